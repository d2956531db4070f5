//! The code model: files, namespaces, class-likes, and their members.
//!
//! Entities are plain data built with consuming setters and keyed member
//! maps. Nothing here renders text; see the printer crate for that.
//! Structural rules are checked separately by [`Validate`].

mod attribute;
mod class_like;
mod constant;
mod file;
mod function;
pub mod member;
mod names;
mod namespace;
mod property;
mod types;
mod validate;
mod visibility;

pub use attribute::Attribute;
pub use class_like::{
    Class, ClassLike, Decl, Declaration, Enum, EnumCase, HasProperties, HasTraits, Interface,
    Trait, TraitUse,
};
pub use constant::Constant;
pub use file::File;
pub use function::{
    Closure, ClosureUse, Function, FunctionLike, Method, Parameter, Promotion, Signature,
};
pub use member::MemberMap;
pub use names::{NameKind, NameTable, simplify_tagged_names, tag_name};
pub use namespace::Namespace;
pub use property::{HookType, Hooks, Property, PropertyHook};
pub use types::TypeHint;
pub use validate::Validate;
pub use visibility::Visibility;
