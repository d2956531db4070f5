//! PHP source printer for the phpgen code model.
//!
//! [`Printer`] walks a model top-down (file, namespace, class-like, member,
//! parameter list, body) and returns the rendered text. Layout choices come
//! from [`PrinterConfig`]; each declaration is validated before it is
//! printed, and any error aborts the whole render.

mod class_like;
mod config;
mod file;
mod function;
mod printer;

pub use config::PrinterConfig;
pub use printer::Printer;
