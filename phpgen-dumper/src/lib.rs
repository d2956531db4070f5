//! Rendering of runtime values as PHP literal expressions.
//!
//! [`Dumper`] turns a [`Value`] into source text that evaluates back to an
//! equal value, and expands placeholder templates through
//! [`Dumper::format`].

mod dumper;
mod escape;
mod json;
mod literal;
mod template;
mod value;

pub use dumper::{DEFAULT_OBJECT_FACTORY, Dumper};
pub use literal::Literal;
pub use value::{Array, Callable, DateTime, Key, Object, ObjectRef, Value};
