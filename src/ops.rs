use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use crate::error::IrError;

/// The closed catalog of operators a parser may emit.
///
/// A framework parser translates its own operator names into this catalog and
/// rejects anything it cannot map. Extending the IR means appending a variant here.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
pub enum OperatorKind {
    Activation,
    AddN,
    BatchNorm,
    BatchToSpaceND,
    BiasAdd,
    ChannelShuffle,
    Concat,
    Conv2D,
    Deconv2D,
    DepthToSpace,
    DepthwiseConv2d,
    Dequantize,
    Eltwise,
    FoldedBatchNorm,
    FullyConnected,
    LocalResponseNorm,
    MatMul,
    Pad,
    Pooling,
    Proposal,
    PSROIAlign,
    Quantize,
    Requantize,
    Reshape,
    ResizeBilinear,
    Slice,
    Softmax,
    SpaceToBatchND,
    SpaceToDepth,
    Transpose,
    WinogradInverseTransform,
    WinogradTransform,
}

impl OperatorKind {
    /// Canonical operator name as stored in serialized graphs.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn parse(name: &str) -> Result<Self, IrError> {
        name.parse().map_err(|_| IrError::UnsupportedOperator {
            name: name.to_string(),
        })
    }
}

/// Case-sensitive membership test against the operator catalog.
pub fn is_supported(name: &str) -> bool {
    name.parse::<OperatorKind>().is_ok()
}
