//! Canonical attribute keys and reserved node names.
//!
//! These strings are embedded in serialized graphs. Every reader and writer of
//! the IR must use them instead of ad-hoc literals.

pub const INPUT_NODE_NAME: &str = "mace_input_node";
pub const OUTPUT_NODE_NAME: &str = "mace_output_node";
pub const BUFFER_TYPE: &str = "buffer_type";
pub const MODE: &str = "mode";
pub const BUFFER_TO_IMAGE: &str = "BufferToImage";
pub const IMAGE_TO_BUFFER: &str = "ImageToBuffer";

pub const PADDING: &str = "padding";
pub const PADDING_VALUES: &str = "padding_values";
pub const STRIDES: &str = "strides";
pub const DILATIONS: &str = "dilations";
pub const POOLING_TYPE: &str = "pooling_type";
pub const GLOBAL_POOLING: &str = "global_pooling";
pub const KERNELS: &str = "kernels";
pub const DATA_FORMAT: &str = "data_format";
pub const FILTER_FORMAT: &str = "filter_format";
pub const ELEMENT_TYPE: &str = "type";
pub const ACTIVATION_TYPE: &str = "activation";
pub const ACTIVATION_MAX_LIMIT: &str = "max_limit";
pub const RESIZE_SIZE: &str = "size";
pub const BATCH_TO_SPACE_CROPS: &str = "crops";
pub const PADDINGS: &str = "paddings";
pub const ALIGN_CORNERS: &str = "align_corners";
pub const SPACE_BATCH_BLOCK_SHAPE: &str = "block_shape";
pub const SPACE_DEPTH_BLOCK_SIZE: &str = "block_size";
pub const CONSTANT_VALUE: &str = "constant_value";
pub const DIMS: &str = "dims";
pub const AXIS: &str = "axis";
pub const SHAPE: &str = "shape";
pub const WINOGRAD_FILTER_TRANSFORMED: &str = "is_filter_transformed";

/// Every argument key a node or graph may carry.
pub const ARG_KEYS: &[&str] = &[
    BUFFER_TYPE,
    MODE,
    PADDING,
    PADDING_VALUES,
    STRIDES,
    DILATIONS,
    POOLING_TYPE,
    GLOBAL_POOLING,
    KERNELS,
    DATA_FORMAT,
    FILTER_FORMAT,
    ELEMENT_TYPE,
    ACTIVATION_TYPE,
    ACTIVATION_MAX_LIMIT,
    RESIZE_SIZE,
    BATCH_TO_SPACE_CROPS,
    PADDINGS,
    ALIGN_CORNERS,
    SPACE_BATCH_BLOCK_SHAPE,
    SPACE_DEPTH_BLOCK_SIZE,
    CONSTANT_VALUE,
    DIMS,
    AXIS,
    SHAPE,
    WINOGRAD_FILTER_TRANSFORMED,
];

pub fn is_known_arg_key(name: &str) -> bool {
    ARG_KEYS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn arg_keys_are_distinct() {
        let unique: HashSet<_> = ARG_KEYS.iter().collect();
        assert_eq!(unique.len(), ARG_KEYS.len());
        assert_eq!(ARG_KEYS.len(), 25);
    }

    #[test]
    fn wire_strings_are_stable() {
        assert_eq!(ELEMENT_TYPE, "type");
        assert_eq!(ACTIVATION_TYPE, "activation");
        assert_eq!(WINOGRAD_FILTER_TRANSFORMED, "is_filter_transformed");
        assert!(is_known_arg_key("data_format"));
        assert!(!is_known_arg_key("dataFormat"));
    }
}
