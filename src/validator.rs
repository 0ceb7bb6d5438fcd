use std::collections::{HashMap, HashSet};

use log::warn;

use crate::enums::{DataFormat, EnumDomain, FilterFormat};
use crate::error::IrError;
use crate::graph::{HasArgs, NetDef, OperatorDef};
use crate::keywords;
use crate::util;

#[derive(Debug)]
pub struct ValidationArtifacts {
    pub tensor_to_producer: HashMap<String, String>,
    pub tensor_to_consumers: HashMap<String, Vec<String>>,
    /// Tensors consumed but never produced, in first-use order (graph inputs and weights).
    pub external_tensors: Vec<String>,
    /// Tensors produced but never consumed, in production order.
    pub terminal_tensors: Vec<String>,
}

/// Structural checks over a finished graph. The IR itself never enforces these.
pub struct NetValidator<'a> {
    net: &'a NetDef,
    produced: HashSet<&'a str>,
    tensor_to_producer: HashMap<String, String>,
    tensor_to_consumers: HashMap<String, Vec<String>>,
}

impl<'a> NetValidator<'a> {
    pub fn new(net: &'a NetDef) -> Self {
        Self {
            net,
            produced: HashSet::new(),
            tensor_to_producer: HashMap::new(),
            tensor_to_consumers: HashMap::new(),
        }
    }

    pub fn validate(mut self) -> Result<ValidationArtifacts, IrError> {
        let net = self.net;
        if net.ops.is_empty() {
            return Err(IrError::EmptyGraph);
        }

        let mut names = HashSet::new();
        for op in &net.ops {
            if !names.insert(op.name.as_str()) {
                return Err(IrError::DuplicateOperatorName {
                    name: op.name.clone(),
                });
            }
        }

        let graph_filter_format = util::filter_format(net);
        let all_outputs: HashSet<&str> = net
            .ops
            .iter()
            .flat_map(|op| op.outputs.iter().map(String::as_str))
            .collect();

        let mut external = Vec::new();
        for op in &net.ops {
            self.check_format_args(op, graph_filter_format)?;
            for input in &op.inputs {
                if !self.produced.contains(input.as_str()) {
                    if all_outputs.contains(input.as_str()) {
                        return Err(IrError::TensorNotReady {
                            operator: op.name.clone(),
                            tensor: input.clone(),
                        });
                    }
                    if !external.contains(input) {
                        external.push(input.clone());
                    }
                }
                self.tensor_to_consumers
                    .entry(input.clone())
                    .or_default()
                    .push(op.name.clone());
            }
            for output in &op.outputs {
                if !self.produced.insert(output.as_str()) {
                    return Err(IrError::TensorProducedTwice {
                        operator: op.name.clone(),
                        tensor: output.clone(),
                    });
                }
                self.tensor_to_producer
                    .insert(output.clone(), op.name.clone());
            }
        }

        let terminal = net
            .ops
            .iter()
            .flat_map(|op| op.outputs.iter())
            .filter(|tensor| !self.tensor_to_consumers.contains_key(tensor.as_str()))
            .cloned()
            .collect();

        Ok(ValidationArtifacts {
            tensor_to_producer: self.tensor_to_producer,
            tensor_to_consumers: self.tensor_to_consumers,
            external_tensors: external,
            terminal_tensors: terminal,
        })
    }

    fn check_format_args(
        &self,
        op: &OperatorDef,
        graph_filter_format: Option<FilterFormat>,
    ) -> Result<(), IrError> {
        for arg in op.args() {
            if !keywords::is_known_arg_key(&arg.name) {
                warn!("operator `{}` carries unknown argument `{}`", op.name, arg.name);
            }
        }

        check_domain::<DataFormat>(op, keywords::DATA_FORMAT)?;
        check_domain::<FilterFormat>(op, keywords::FILTER_FORMAT)?;

        if let (Some(graph), Some(declared)) = (
            graph_filter_format,
            util::enum_arg::<FilterFormat, _>(op, keywords::FILTER_FORMAT),
        ) && graph != declared
        {
            return Err(IrError::InconsistentFilterFormat {
                operator: op.name.clone(),
                declared,
                graph,
            });
        }
        Ok(())
    }
}

fn check_domain<E: EnumDomain>(op: &OperatorDef, key: &'static str) -> Result<(), IrError> {
    let Some(arg) = op.arg(key) else {
        return Ok(());
    };
    let Some(value) = arg.value.as_int() else {
        return Err(IrError::ArgKindMismatch {
            operator: op.name.clone(),
            key,
            expected: "int",
            actual: arg.value.kind_name(),
        });
    };
    if E::decode(value).is_none() {
        return Err(IrError::InvalidFormatArg {
            operator: op.name.clone(),
            key,
            domain: E::DOMAIN,
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::OperatorKind;

    fn op(name: &str, kind: OperatorKind, inputs: &[&str], outputs: &[&str]) -> OperatorDef {
        OperatorDef::new(name, kind)
            .with_inputs(inputs.iter().copied())
            .with_outputs(outputs.iter().copied())
    }

    fn chain() -> NetDef {
        let mut net = NetDef::new("chain");
        net.add_op(op("conv", OperatorKind::Conv2D, &["x", "w"], &["c"]));
        net.add_op(op("act", OperatorKind::Activation, &["c"], &["a"]));
        net.add_op(op("add", OperatorKind::AddN, &["a", "c"], &["y"]));
        net
    }

    #[test]
    fn valid_chain_collects_edges() {
        let net = chain();
        let artifacts = NetValidator::new(&net).validate().unwrap();
        assert_eq!(artifacts.external_tensors, vec!["x", "w"]);
        assert_eq!(artifacts.terminal_tensors, vec!["y"]);
        assert_eq!(artifacts.tensor_to_producer["c"], "conv");
        assert_eq!(artifacts.tensor_to_consumers["c"], vec!["act", "add"]);
    }

    #[test]
    fn empty_graph_fails() {
        let net = NetDef::new("empty");
        assert!(matches!(
            NetValidator::new(&net).validate(),
            Err(IrError::EmptyGraph)
        ));
    }

    #[test]
    fn duplicate_operator_name_fails() {
        let mut net = chain();
        net.add_op(op("act", OperatorKind::Softmax, &["y"], &["z"]));
        match NetValidator::new(&net).validate() {
            Err(IrError::DuplicateOperatorName { name }) => assert_eq!(name, "act"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn out_of_order_consumer_fails() {
        let mut net = NetDef::new("reversed");
        net.add_op(op("act", OperatorKind::Activation, &["c"], &["a"]));
        net.add_op(op("conv", OperatorKind::Conv2D, &["x"], &["c"]));
        match NetValidator::new(&net).validate() {
            Err(IrError::TensorNotReady { operator, tensor }) => {
                assert_eq!(operator, "act");
                assert_eq!(tensor, "c");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn tensor_produced_twice_fails() {
        let mut net = chain();
        net.add_op(op("again", OperatorKind::Reshape, &["y"], &["a"]));
        assert!(matches!(
            NetValidator::new(&net).validate(),
            Err(IrError::TensorProducedTwice { .. })
        ));
    }

    #[test]
    fn invalid_format_discriminant_fails() {
        let mut net = chain();
        net.ops[1].add_arg(keywords::DATA_FORMAT, 5);
        match NetValidator::new(&net).validate() {
            Err(IrError::InvalidFormatArg {
                operator,
                key,
                value,
                ..
            }) => {
                assert_eq!(operator, "act");
                assert_eq!(key, keywords::DATA_FORMAT);
                assert_eq!(value, 5);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn node_filter_format_must_match_graph() {
        let mut net = chain();
        util::set_filter_format(&mut net, FilterFormat::Hwio);
        util::set_enum_arg(&mut net.ops[0], keywords::FILTER_FORMAT, FilterFormat::Hwio);
        assert!(NetValidator::new(&net).validate().is_ok());

        util::set_enum_arg(&mut net.ops[0], keywords::FILTER_FORMAT, FilterFormat::Oihw);
        match NetValidator::new(&net).validate() {
            Err(IrError::InconsistentFilterFormat {
                declared, graph, ..
            }) => {
                assert_eq!(declared, FilterFormat::Oihw);
                assert_eq!(graph, FilterFormat::Hwio);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn format_arg_with_wrong_kind_fails() {
        let mut net = chain();
        net.ops[0].add_arg(keywords::FILTER_FORMAT, "OIHW");
        match NetValidator::new(&net).validate() {
            Err(IrError::ArgKindMismatch {
                operator,
                key,
                expected,
                actual,
            }) => {
                assert_eq!(operator, "conv");
                assert_eq!(key, keywords::FILTER_FORMAT);
                assert_eq!(expected, "int");
                assert_eq!(actual, "str");
            }
            other => panic!("unexpected result {:?}", other),
        }

        let mut net = chain();
        net.ops[2].add_arg(keywords::DATA_FORMAT, vec![0.0f32]);
        assert!(matches!(
            NetValidator::new(&net).validate(),
            Err(IrError::ArgKindMismatch { actual: "floats", .. })
        ));
    }

    #[test]
    fn unknown_argument_keys_are_not_errors() {
        let mut net = chain();
        net.ops[0].add_arg("custom_hint", 1);
        assert!(NetValidator::new(&net).validate().is_ok());
    }
}
