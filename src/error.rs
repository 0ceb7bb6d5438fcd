use std::path::PathBuf;

use serde_json::Error as JsonError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IrError {
    #[error("value {value} is not a valid {domain}")]
    InvalidEnumValue { domain: &'static str, value: i32 },
    #[error("operator `{name}` is not in the supported operator catalog")]
    UnsupportedOperator { name: String },
    #[error("graph file {path} could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("graph JSON could not be parsed: {source}")]
    Parse {
        #[from]
        source: JsonError,
    },
    #[error("node spec `{spec}` is malformed: {reason}")]
    InvalidNodeSpec { spec: String, reason: String },
    #[error("model converter `{requested}` is not available. Supported: {available:?}")]
    UnknownConverter {
        requested: String,
        available: Vec<&'static str>,
    },
    #[error("configured {role} node `{name}` does not exist in the graph")]
    MissingGraphNode { role: &'static str, name: String },
    #[error("model conversion failed for {platform}: {reason}")]
    ConversionFailed { platform: String, reason: String },
    #[error("graph does not contain any operators")]
    EmptyGraph,
    #[error("operator name `{name}` is duplicated")]
    DuplicateOperatorName { name: String },
    #[error("operator `{operator}` consumes tensor `{tensor}` before it is produced")]
    TensorNotReady { operator: String, tensor: String },
    #[error("operator `{operator}` attempts to produce tensor `{tensor}` a second time")]
    TensorProducedTwice { operator: String, tensor: String },
    #[error("operator `{operator}` stores {value} under `{key}`, which is not a valid {domain}")]
    InvalidFormatArg {
        operator: String,
        key: &'static str,
        domain: &'static str,
        value: i64,
    },
    #[error(
        "operator `{operator}` declares filter format {declared:?} but the graph uses {graph:?}"
    )]
    InconsistentFilterFormat {
        operator: String,
        declared: crate::enums::FilterFormat,
        graph: crate::enums::FilterFormat,
    },
    #[error("`{holder}` stores a non-finite float under `{key}`, which JSON cannot represent")]
    NonFiniteArg { holder: String, key: String },
    #[error("operator `{operator}` stores a {actual} under `{key}`, expected {expected}")]
    ArgKindMismatch {
        operator: String,
        key: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("graph could not be exported to {path}: {source}")]
    ExportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IrError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IrError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn export(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IrError::ExportIo {
            path: path.into(),
            source,
        }
    }
}
