use std::path::Path;

use log::{debug, info};

use super::ModelConverter;
use crate::enums::{DataFormat, EnumDomain};
use crate::error::IrError;
use crate::graph::{HasArgs, NetDef};
use crate::keywords;
use crate::loader::load_net_from_path;
use crate::ops::OperatorKind;
use crate::option::ConverterOption;
use crate::util;

/// Reads a graph already persisted as JSON and prepares it for the given options.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonNetConverter;

impl JsonNetConverter {
    fn check_nodes(net: &NetDef, option: &ConverterOption) -> Result<(), IrError> {
        for name in option.input_nodes().keys() {
            if !net.references_tensor(name) {
                return Err(IrError::MissingGraphNode {
                    role: "input",
                    name: name.clone(),
                });
            }
        }
        for name in option.output_nodes().keys() {
            if net.producer_of(name).is_none() {
                return Err(IrError::MissingGraphNode {
                    role: "output",
                    name: name.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn prepare(&self, mut net: NetDef, option: &ConverterOption) -> Result<NetDef, IrError> {
        if net.ops.is_empty() {
            return Err(IrError::ConversionFailed {
                platform: self.platform().to_string(),
                reason: "graph does not contain any operators".to_string(),
            });
        }
        Self::check_nodes(&net, option)?;

        if util::data_format(&net).is_none() {
            debug!("net `{}` has no data format, tagging NHWC", net.name);
            util::set_data_format(&mut net, DataFormat::Nhwc);
        }
        util::set_arg(
            &mut net,
            keywords::ELEMENT_TYPE,
            i64::from(option.data_type().discriminant()),
        );

        if option.winograd_enabled() {
            let mut marked = 0usize;
            for op in net
                .ops
                .iter_mut()
                .filter(|op| op.op_type == OperatorKind::Conv2D)
            {
                if op.arg(keywords::WINOGRAD_FILTER_TRANSFORMED).is_none() {
                    op.add_arg(keywords::WINOGRAD_FILTER_TRANSFORMED, 0);
                    marked += 1;
                }
            }
            debug!("marked {} Conv2D operators for winograd", marked);
        }

        info!(
            "prepared net `{}`: {} operators, {} inputs, {} outputs, {:?} on {:?}",
            net.name,
            net.ops.len(),
            option.input_nodes().len(),
            option.output_nodes().len(),
            option.data_type(),
            option.device()
        );
        Ok(net)
    }
}

impl ModelConverter for JsonNetConverter {
    fn platform(&self) -> &'static str {
        "json"
    }

    fn run(&self, model: &Path, option: &ConverterOption) -> Result<NetDef, IrError> {
        let net = load_net_from_path(model)?;
        self.prepare(net, option)
    }
}
