//! Pre-formatted PHP expressions.

use std::fmt;

use crate::{Array, Value};

/// A PHP expression emitted verbatim by the dumper.
///
/// When arguments are attached, the text is treated as a
/// [`format`](crate::Dumper::format) template and the arguments are dumped
/// into its placeholders at render time.
///
/// # Example
///
/// ```
/// use phpgen_dumper::{Dumper, Literal, Value};
///
/// let lit = Literal::with_args("max(?, ?)", vec![Value::Int(1), Value::from("x")]);
/// assert_eq!(Dumper::new().dump(&lit.into()).unwrap(), "max(1, 'x')");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    value: String,
    args: Option<Vec<Value>>,
}

impl Literal {
    /// Create a literal from raw expression text.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            args: None,
        }
    }

    /// Create a literal from a template and its arguments.
    pub fn with_args(template: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            value: template.into(),
            args: Some(args),
        }
    }

    /// A `new \Class(...)` expression; string keys in `args` become named
    /// arguments.
    pub fn new_instance(class: &str, args: Array) -> Self {
        let class = class.trim_start_matches('\\');
        Self::with_args(format!("new \\{class}(...?:)"), vec![Value::Array(args)])
    }

    /// Raw text (or template) of the literal.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Template arguments, when the literal is a template.
    pub fn args(&self) -> Option<&[Value]> {
        self.args.as_deref()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
