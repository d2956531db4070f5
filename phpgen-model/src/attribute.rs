//! `#[Attribute(...)]` annotations.

use phpgen_core::Result;
use phpgen_core::naming::check_qualified_name;
use phpgen_dumper::{Array, Key, Value};

/// An attribute: qualified class name plus positional and named arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: String,
    /// Integer keys are positional, string keys named (`name: value`).
    pub args: Array,
}

impl Attribute {
    /// Create an attribute without arguments.
    pub fn new(name: &str) -> Result<Self> {
        check_qualified_name(name, "attribute", true)?;
        Ok(Self {
            name: name.to_string(),
            args: Array::new(),
        })
    }

    /// Create an attribute with a prepared argument array.
    pub fn with_args(name: &str, args: Array) -> Result<Self> {
        let mut attr = Self::new(name)?;
        attr.args = args;
        Ok(attr)
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value);
        self
    }

    /// Add a named argument.
    pub fn named(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.args.insert(Key::Str(name.to_string()), value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
