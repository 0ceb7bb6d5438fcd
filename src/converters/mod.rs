use std::collections::HashMap;
use std::path::Path;

use crate::error::IrError;
use crate::graph::NetDef;
use crate::option::ConverterOption;

mod json;

pub use json::JsonNetConverter;

/// Turns a source model into a graph. Implementations own all validation of
/// the [`ConverterOption`] they are given.
pub trait ModelConverter {
    fn platform(&self) -> &'static str;
    fn run(&self, model: &Path, option: &ConverterOption) -> Result<NetDef, IrError>;
}

pub struct ConverterRegistry {
    converters: HashMap<&'static str, Box<dyn ModelConverter + Send + Sync>>,
}

impl ConverterRegistry {
    pub fn with_defaults() -> Self {
        let mut registry = Self {
            converters: HashMap::new(),
        };
        registry.register(Box::new(JsonNetConverter));
        registry
    }

    pub fn register(&mut self, converter: Box<dyn ModelConverter + Send + Sync>) {
        self.converters.insert(converter.platform(), converter);
    }

    pub fn available_platforms(&self) -> Vec<&'static str> {
        let mut keys: Vec<_> = self.converters.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    pub fn convert(
        &self,
        platform: &str,
        model: &Path,
        option: &ConverterOption,
    ) -> Result<NetDef, IrError> {
        let key = platform.to_ascii_lowercase();
        let Some(converter) = self.converters.get(key.as_str()) else {
            return Err(IrError::UnknownConverter {
                requested: platform.to_string(),
                available: self.available_platforms(),
            });
        };
        converter.run(model, option)
    }
}
