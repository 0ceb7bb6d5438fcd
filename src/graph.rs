use serde::{Deserialize, Serialize};

use crate::ops::OperatorKind;
use crate::util;

/// Typed value stored under an attribute key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgValue {
    Int(i64),
    Float(f32),
    Str(String),
    Ints(Vec<i64>),
    Floats(Vec<f32>),
}

impl ArgValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ArgValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            ArgValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_ints(&self) -> Option<&[i64]> {
        match self {
            ArgValue::Ints(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_floats(&self) -> Option<&[f32]> {
        match self {
            ArgValue::Floats(values) => Some(values),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ArgValue::Int(_) => "int",
            ArgValue::Float(_) => "float",
            ArgValue::Str(_) => "str",
            ArgValue::Ints(_) => "ints",
            ArgValue::Floats(_) => "floats",
        }
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        ArgValue::Int(value.into())
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Int(value as i64)
    }
}

impl From<f32> for ArgValue {
    fn from(value: f32) -> Self {
        ArgValue::Float(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Str(value)
    }
}

impl From<Vec<i64>> for ArgValue {
    fn from(values: Vec<i64>) -> Self {
        ArgValue::Ints(values)
    }
}

impl From<Vec<f32>> for ArgValue {
    fn from(values: Vec<f32>) -> Self {
        ArgValue::Floats(values)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub value: ArgValue,
}

impl Argument {
    pub fn new(name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Anything that owns an ordered attribute list: a single operator or a whole net.
pub trait HasArgs {
    fn args(&self) -> &[Argument];

    fn args_mut(&mut self) -> &mut Vec<Argument>;

    fn arg(&self, name: &str) -> Option<&Argument> {
        util::get_arg(self, name)
    }

    /// Appends without deduplicating; a repeated key is shadowed by the first one.
    fn add_arg(&mut self, name: &str, value: impl Into<ArgValue>) {
        self.args_mut().push(Argument::new(name, value));
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorDef {
    pub name: String,
    #[serde(rename = "type")]
    pub op_type: OperatorKind,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub args: Vec<Argument>,
    #[serde(default)]
    pub output_shapes: Vec<Vec<i64>>,
}

impl OperatorDef {
    pub fn new(name: impl Into<String>, op_type: OperatorKind) -> Self {
        Self {
            name: name.into(),
            op_type,
            inputs: Vec::new(),
            outputs: Vec::new(),
            args: Vec::new(),
            output_shapes: Vec::new(),
        }
    }

    pub fn with_inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs.extend(inputs.into_iter().map(Into::into));
        self
    }

    pub fn with_outputs<I, S>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outputs.extend(outputs.into_iter().map(Into::into));
        self
    }

    pub fn with_arg(mut self, name: &str, value: impl Into<ArgValue>) -> Self {
        self.add_arg(name, value);
        self
    }

    pub fn get_attribute(&self, key: &str) -> Option<&ArgValue> {
        self.arg(key).map(|arg| &arg.value)
    }

    pub fn add_attribute(&mut self, key: &str, value: impl Into<ArgValue>) {
        self.add_arg(key, value);
    }
}

impl HasArgs for OperatorDef {
    fn args(&self) -> &[Argument] {
        &self.args
    }

    fn args_mut(&mut self) -> &mut Vec<Argument> {
        &mut self.args
    }
}

/// A computation graph. Operator order is the default execution order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetDef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ops: Vec<OperatorDef>,
    #[serde(default)]
    pub args: Vec<Argument>,
}

impl NetDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn add_op(&mut self, op: OperatorDef) {
        self.ops.push(op);
    }

    pub fn op(&self, name: &str) -> Option<&OperatorDef> {
        self.ops.iter().find(|op| op.name == name)
    }

    pub fn op_mut(&mut self, name: &str) -> Option<&mut OperatorDef> {
        self.ops.iter_mut().find(|op| op.name == name)
    }

    /// First operator that lists `tensor` among its outputs.
    pub fn producer_of(&self, tensor: &str) -> Option<&OperatorDef> {
        self.ops
            .iter()
            .find(|op| op.outputs.iter().any(|out| out == tensor))
    }

    pub fn consumers_of<'a>(&'a self, tensor: &'a str) -> impl Iterator<Item = &'a OperatorDef> {
        self.ops
            .iter()
            .filter(move |op| op.inputs.iter().any(|input| input == tensor))
    }

    /// Whether any operator reads or writes a tensor with this name.
    pub fn references_tensor(&self, tensor: &str) -> bool {
        self.ops.iter().any(|op| {
            op.inputs.iter().any(|input| input == tensor)
                || op.outputs.iter().any(|out| out == tensor)
        })
    }
}

impl HasArgs for NetDef {
    fn args(&self) -> &[Argument] {
        &self.args
    }

    fn args_mut(&mut self) -> &mut Vec<Argument> {
        &mut self.args
    }
}
