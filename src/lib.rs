pub mod converters;
pub mod enums;
pub mod error;
pub mod graph;
pub mod graphviz;
pub mod keywords;
pub mod loader;
pub mod logger;
pub mod ops;
pub mod option;
pub mod util;
pub mod validator;

pub use converters::{ConverterRegistry, JsonNetConverter, ModelConverter};
pub use enums::{
    ActivationType, DataFormat, DataType, DeviceType, EltwiseType, EnumDomain, FilterFormat,
    PaddingMode, PoolingType,
};
pub use error::IrError;
pub use graph::{ArgValue, Argument, HasArgs, NetDef, OperatorDef};
pub use graphviz::net_to_dot;
pub use loader::{load_net_from_path, load_option_from_path, save_net_to_path};
pub use ops::{OperatorKind, is_supported};
pub use option::{ConverterOption, NodeInfo};
pub use validator::{NetValidator, ValidationArtifacts};
