use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::{DataType, DeviceType};
use crate::error::IrError;

/// Name and shape of a graph input or output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub name: String,
    #[serde(default)]
    pub shape: Vec<usize>,
}

impl NodeInfo {
    pub fn new(name: impl Into<String>, shape: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }

    /// Parse a command line spec of the form `name` or `name:1,224,224,3`.
    pub fn parse(spec: &str) -> Result<Self, IrError> {
        let invalid = |reason: &str| IrError::InvalidNodeSpec {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };
        let (name, dims) = match spec.split_once(':') {
            Some((name, dims)) => (name.trim(), Some(dims.trim())),
            None => (spec.trim(), None),
        };
        if name.is_empty() {
            return Err(invalid("node name is empty"));
        }
        let shape = match dims {
            None | Some("") => Vec::new(),
            Some(dims) => dims
                .split(',')
                .map(|dim| {
                    dim.trim()
                        .parse::<usize>()
                        .map_err(|_| invalid(&format!("`{}` is not a dimension", dim.trim())))
                })
                .collect::<Result<Vec<_>, _>>()?,
        };
        Ok(Self::new(name, shape))
    }
}

impl fmt::Display for NodeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.name, self.shape)
    }
}

/// Options handed to a model converter. Performs no validation; that is the
/// converter's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterOption {
    #[serde(with = "node_list")]
    input_nodes: BTreeMap<String, NodeInfo>,
    #[serde(with = "node_list")]
    output_nodes: BTreeMap<String, NodeInfo>,
    data_type: DataType,
    device: DeviceType,
    winograd_enabled: bool,
}

impl ConverterOption {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_nodes(&self) -> &BTreeMap<String, NodeInfo> {
        &self.input_nodes
    }

    pub fn output_nodes(&self) -> &BTreeMap<String, NodeInfo> {
        &self.output_nodes
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn device(&self) -> DeviceType {
        self.device
    }

    pub fn winograd_enabled(&self) -> bool {
        self.winograd_enabled
    }

    /// Inserts by name; an existing entry with the same name is replaced.
    pub fn add_input_node(&mut self, node: NodeInfo) {
        self.input_nodes.insert(node.name.clone(), node);
    }

    pub fn add_output_node(&mut self, node: NodeInfo) {
        self.output_nodes.insert(node.name.clone(), node);
    }

    pub fn set_input_nodes(&mut self, nodes: impl IntoIterator<Item = NodeInfo>) {
        for node in nodes {
            self.add_input_node(node);
        }
    }

    pub fn set_output_nodes(&mut self, nodes: impl IntoIterator<Item = NodeInfo>) {
        for node in nodes {
            self.add_output_node(node);
        }
    }

    pub fn set_data_type(&mut self, data_type: DataType) {
        self.data_type = data_type;
    }

    pub fn set_device(&mut self, device: DeviceType) {
        self.device = device;
    }

    pub fn set_winograd_enabled(&mut self, enabled: bool) {
        self.winograd_enabled = enabled;
    }
}

/// Node maps persist as a list of [`NodeInfo`] and are re-keyed by node name
/// on load, later entries replacing earlier ones.
mod node_list {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serializer};

    use super::NodeInfo;

    pub fn serialize<S>(
        nodes: &BTreeMap<String, NodeInfo>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(nodes.values())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<String, NodeInfo>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let nodes = Vec::<NodeInfo>::deserialize(deserializer)?;
        Ok(nodes
            .into_iter()
            .map(|node| (node.name.clone(), node))
            .collect())
    }
}
