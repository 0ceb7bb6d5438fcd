//! Closed, integer-backed domains shared by every producer and consumer of the IR.
//!
//! Discriminants are persisted inside serialized graphs. New variants may be
//! appended; existing values must never be reassigned.

use serde::{Deserialize, Serialize};

use crate::error::IrError;

/// A closed domain of enumerants with a stable integer discriminant.
pub trait EnumDomain: Copy + Sized + 'static {
    /// Human readable domain name used in error messages.
    const DOMAIN: &'static str;
    /// Every enumerant, in discriminant order.
    const ALL: &'static [Self];

    fn from_discriminant(value: i32) -> Result<Self, IrError>;

    fn discriminant(self) -> i32;

    /// Lenient decode of a stored argument value; out-of-domain values map to `None`.
    fn decode(value: i64) -> Option<Self> {
        i32::try_from(value)
            .ok()
            .and_then(|v| Self::from_discriminant(v).ok())
    }
}

macro_rules! discriminant_enum {
    (
        $(#[$meta:meta])*
        $name:ident => $domain:literal {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i32", into = "i32")]
        #[repr(i32)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl EnumDomain for $name {
            const DOMAIN: &'static str = $domain;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn from_discriminant(value: i32) -> Result<Self, IrError> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    _ => Err(IrError::InvalidEnumValue {
                        domain: $domain,
                        value,
                    }),
                }
            }

            fn discriminant(self) -> i32 {
                self as i32
            }
        }

        impl TryFrom<i32> for $name {
            type Error = IrError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                <Self as EnumDomain>::from_discriminant(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.discriminant()
            }
        }
    };
}

discriminant_enum! {
    /// Memory order of activation tensors.
    DataFormat => "data format" {
        /// Row-major, channel last.
        Nhwc = 0,
        /// Row-major, channel first.
        Nchw = 1,
    }
}

discriminant_enum! {
    /// Memory order of convolution filters.
    FilterFormat => "filter format" {
        Hwio = 0,
        Oihw = 1,
        Hwoi = 2,
    }
}

discriminant_enum! {
    PaddingMode => "padding mode" {
        Valid = 0,
        Same = 1,
        Full = 2,
    }
}

discriminant_enum! {
    PoolingType => "pooling type" {
        Avg = 1,
        Max = 2,
    }
}

discriminant_enum! {
    ActivationType => "activation type" {
        Noop = 0,
        Relu = 1,
        /// ReLU clipped at `max_limit`.
        Relux = 2,
        Prelu = 3,
        Tanh = 4,
        Sigmoid = 5,
    }
}

discriminant_enum! {
    EltwiseType => "eltwise type" {
        Sum = 0,
        Sub = 1,
        Prod = 2,
        Div = 3,
        Min = 4,
        Max = 5,
        Neg = 6,
        Abs = 7,
        SqrDiff = 8,
        Pow = 9,
    }
}

discriminant_enum! {
    /// Numeric type the converted model computes in.
    #[derive(Default)]
    DataType => "data type" {
        Invalid = 0,
        #[default]
        Float = 1,
        Uint8 = 2,
        Half = 3,
        Int32 = 4,
    }
}

discriminant_enum! {
    /// Runtime device the converted model targets.
    #[derive(Default)]
    DeviceType => "device type" {
        #[default]
        Cpu = 0,
        Gpu = 2,
        Hexagon = 3,
    }
}
