use std::fs;
use std::path::Path;

use log::debug;

use crate::error::IrError;
use crate::graph::{ArgValue, Argument, NetDef};
use crate::option::ConverterOption;

/// Load a graph persisted as JSON.
pub fn load_net_from_path(path: impl AsRef<Path>) -> Result<NetDef, IrError> {
    let path_ref = path.as_ref();
    let contents = fs::read_to_string(path_ref).map_err(|err| IrError::io(path_ref, err))?;
    let net: NetDef = serde_json::from_str(&contents)?;
    debug!(
        "loaded net `{}` with {} operators from {}",
        net.name,
        net.ops.len(),
        path_ref.display()
    );
    Ok(net)
}

/// Persist a graph as JSON. Fails before writing anything if an argument holds
/// NaN or an infinity, since the file could not be loaded back.
pub fn save_net_to_path(net: &NetDef, path: impl AsRef<Path>) -> Result<(), IrError> {
    check_finite(&net.name, &net.args)?;
    for op in &net.ops {
        check_finite(&op.name, &op.args)?;
    }
    let path_ref = path.as_ref();
    let json = serde_json::to_string_pretty(net)?;
    fs::write(path_ref, json).map_err(|err| IrError::export(path_ref, err))
}

fn check_finite(holder: &str, args: &[Argument]) -> Result<(), IrError> {
    for arg in args {
        let finite = match &arg.value {
            ArgValue::Float(value) => value.is_finite(),
            ArgValue::Floats(values) => values.iter().all(|value| value.is_finite()),
            _ => true,
        };
        if !finite {
            return Err(IrError::NonFiniteArg {
                holder: holder.to_string(),
                key: arg.name.clone(),
            });
        }
    }
    Ok(())
}

/// Load converter options from a JSON file. Missing fields take their defaults.
pub fn load_option_from_path(path: impl AsRef<Path>) -> Result<ConverterOption, IrError> {
    let path_ref = path.as_ref();
    let contents = fs::read_to_string(path_ref).map_err(|err| IrError::io(path_ref, err))?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{DeviceType, FilterFormat};
    use crate::graph::{HasArgs, OperatorDef};
    use crate::keywords;
    use crate::ops::OperatorKind;
    use crate::util;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn loads_net_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("net.json");
        let doc = json!({
            "name": "mobilenet",
            "args": [{"name": "filter_format", "value": {"int": 1}}],
            "ops": [{
                "name": "conv1",
                "type": "Conv2D",
                "inputs": ["input", "filter"],
                "outputs": ["conv1_out"],
                "args": [{"name": "strides", "value": {"ints": [2, 2]}}]
            }]
        });
        fs::write(&path, doc.to_string()).unwrap();

        let net = load_net_from_path(&path).unwrap();

        assert_eq!(net.name, "mobilenet");
        assert_eq!(net.ops[0].op_type, OperatorKind::Conv2D);
        assert_eq!(util::filter_format(&net), Some(FilterFormat::Oihw));
        assert!(net.ops[0].output_shapes.is_empty());
    }

    #[test]
    fn rejects_unknown_operator_kind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad_op.json");
        let doc = json!({"ops": [{"name": "g", "type": "Gelu"}]});
        fs::write(&path, doc.to_string()).unwrap();

        let err = load_net_from_path(&path).unwrap_err();
        assert!(matches!(err, IrError::Parse { .. }), "unexpected {:?}", err);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("does_not_exist.json");
        match load_net_from_path(&path) {
            Err(IrError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn saved_net_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved.json");
        let mut net = NetDef::new("saved");
        net.add_arg(keywords::CONSTANT_VALUE, 0.5f32);
        net.add_op(
            OperatorDef::new("bn", OperatorKind::FoldedBatchNorm)
                .with_inputs(["x", "scale", "offset"])
                .with_outputs(["y"])
                .with_arg(keywords::ACTIVATION_MAX_LIMIT, 6.0f32)
                .with_arg("epsilon_values", vec![1e-5f32, -0.25, 3.5])
                .with_arg(keywords::SHAPE, vec![1i64, 2, 3]),
        );
        save_net_to_path(&net, &path).unwrap();
        let loaded = load_net_from_path(&path).unwrap();
        assert_eq!(loaded, net);
        assert_eq!(
            loaded.ops[0]
                .get_attribute("epsilon_values")
                .and_then(|value| value.as_floats()),
            Some(&[1e-5f32, -0.25, 3.5][..])
        );
    }

    #[test]
    fn non_finite_floats_are_not_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nan.json");
        let mut net = NetDef::new("nan");
        net.add_op(
            OperatorDef::new("pad", OperatorKind::Pad)
                .with_inputs(["x"])
                .with_outputs(["y"])
                .with_arg(keywords::CONSTANT_VALUE, f32::NAN),
        );
        match save_net_to_path(&net, &path) {
            Err(IrError::NonFiniteArg { holder, key }) => {
                assert_eq!(holder, "pad");
                assert_eq!(key, keywords::CONSTANT_VALUE);
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert!(!path.exists());

        let mut net = NetDef::new("inf");
        net.add_arg("scales", vec![1.0f32, f32::INFINITY]);
        assert!(matches!(
            save_net_to_path(&net, &path),
            Err(IrError::NonFiniteArg { .. })
        ));
    }

    #[test]
    fn loads_option_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("option.json");
        let doc = json!({
            "output_nodes": [{"name": "prob"}],
            "device": 3,
            "winograd_enabled": true
        });
        fs::write(&path, doc.to_string()).unwrap();

        let option = load_option_from_path(&path).unwrap();
        assert_eq!(option.device(), DeviceType::Hexagon);
        assert!(option.winograd_enabled());
        assert!(option.output_nodes()["prob"].shape.is_empty());
    }
}
