//! Build PHP code as a typed model and print it as source.
//!
//! The pieces live in separate crates and are re-exported here:
//!
//! - model entities and name resolution from `phpgen-model`
//! - the literal [`Dumper`] and [`Value`] from `phpgen-dumper`
//! - the [`Printer`] and [`PrinterConfig`] from `phpgen-printer`
//!
//! # Example
//!
//! ```
//! use phpgen::prelude::*;
//!
//! # fn main() -> phpgen::Result<()> {
//! let mut file = File::new().strict_types();
//! file.add_class("App\\Greeter")?
//!     .add_method(Method::new("hello")?.returns("string").body("return 'hi';"))?;
//!
//! let code = Printer::default().print_file(&file)?;
//! assert!(code.starts_with("<?php\n\ndeclare(strict_types=1);\n\nnamespace App;\n"));
//! # Ok(())
//! # }
//! ```

pub use phpgen_core::{CodeBuilder, Error, Indent, MemberKind, Result, naming, text};
pub use phpgen_dumper::{
    Array, Callable, DEFAULT_OBJECT_FACTORY, DateTime, Dumper, Key, Literal, Object, ObjectRef,
    Value,
};
pub use phpgen_model::{
    Attribute, Class, ClassLike, Closure, ClosureUse, Constant, Decl, Declaration, Enum, EnumCase,
    File, Function, FunctionLike, HasProperties, HasTraits, HookType, Hooks, Interface, MemberMap,
    Method, NameKind, NameTable, Namespace, Parameter, Promotion, Property, PropertyHook,
    Signature, Trait, TraitUse, TypeHint, Validate, Visibility, simplify_tagged_names, tag_name,
};
pub use phpgen_printer::{Printer, PrinterConfig};

/// Everything needed to build and print a model, including the builder
/// traits.
pub mod prelude {
    pub use crate::{
        Array, Attribute, Class, ClassLike, Closure, Constant, Declaration, Enum, EnumCase, File,
        Function, FunctionLike, HasProperties, HasTraits, HookType, Interface, Literal, Method,
        NameKind, Namespace, Parameter, Printer, PrinterConfig, Property, PropertyHook, Trait,
        Validate, Value, Visibility,
    };
}
