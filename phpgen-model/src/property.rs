//! Properties and their `get`/`set` hooks.

use std::fmt;

use phpgen_core::naming::check_identifier;
use phpgen_core::{MemberKind, Result};
use phpgen_dumper::Value;

use crate::member::{Member, MemberMap};
use crate::{Attribute, Parameter, TypeHint, Visibility};

/// Which accessor a hook implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookType {
    Get,
    Set,
}

impl HookType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set => "set",
        }
    }
}

impl fmt::Display for HookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accessor body attached to a property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyHook {
    /// Statements, or the expression of a short (`=>`) hook.
    pub body: String,
    /// Render as `get => expr;`.
    pub short: bool,
    pub is_final: bool,
    pub is_abstract: bool,
    /// `&get`.
    pub returns_ref: bool,
    pub parameters: MemberMap<Parameter>,
    pub doc: Option<String>,
    pub attributes: Vec<Attribute>,
}

impl PropertyHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// A hook with a block body.
    pub fn body(mut self, code: impl Into<String>) -> Self {
        self.body = code.into();
        self.short = false;
        self
    }

    /// A hook with a single expression: `get => expr;`.
    pub fn short(mut self, expr: impl Into<String>) -> Self {
        self.body = expr.into();
        self.short = true;
        self
    }

    pub fn final_(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn returns_ref(mut self) -> Self {
        self.returns_ref = true;
        self
    }

    /// Add a parameter (only meaningful for `set`).
    pub fn param(mut self, param: Parameter) -> Result<Self> {
        self.parameters.add(param, false)?;
        Ok(self)
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn attribute(mut self, attr: Attribute) -> Self {
        self.attributes.push(attr);
        self
    }
}

/// The two hook slots of a property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hooks {
    get: Option<PropertyHook>,
    set: Option<PropertyHook>,
}

impl Hooks {
    fn slot(&mut self, ty: HookType) -> &mut Option<PropertyHook> {
        match ty {
            HookType::Get => &mut self.get,
            HookType::Set => &mut self.set,
        }
    }

    /// Put `hook` into its slot, replacing any previous one.
    pub fn add(&mut self, ty: HookType, hook: PropertyHook) -> &mut PropertyHook {
        self.slot(ty).insert(hook)
    }

    pub fn get(&self, ty: HookType) -> Option<&PropertyHook> {
        match ty {
            HookType::Get => self.get.as_ref(),
            HookType::Set => self.set.as_ref(),
        }
    }

    pub fn get_mut(&mut self, ty: HookType) -> Option<&mut PropertyHook> {
        self.slot(ty).as_mut()
    }

    pub fn has(&self, ty: HookType) -> bool {
        self.get(ty).is_some()
    }

    pub fn remove(&mut self, ty: HookType) -> Option<PropertyHook> {
        self.slot(ty).take()
    }

    /// Present hooks, `get` first.
    pub fn iter(&self) -> impl Iterator<Item = (HookType, &PropertyHook)> {
        [(HookType::Get, &self.get), (HookType::Set, &self.set)]
            .into_iter()
            .filter_map(|(ty, hook)| hook.as_ref().map(|h| (ty, h)))
    }

    pub fn is_empty(&self) -> bool {
        self.get.is_none() && self.set.is_none()
    }
}

/// A class, trait, or interface property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    name: String,
    /// Default value; `None` renders no initializer.
    pub value: Option<Value>,
    pub ty: TypeHint,
    pub visibility: Option<Visibility>,
    /// Write visibility for asymmetric properties, e.g. `private(set)`.
    pub set_visibility: Option<Visibility>,
    pub is_static: bool,
    pub is_readonly: bool,
    pub is_final: bool,
    pub is_abstract: bool,
    pub hooks: Hooks,
    pub doc: Option<String>,
    pub attributes: Vec<Attribute>,
}

impl Property {
    pub fn new(name: &str) -> Result<Self> {
        check_identifier(name, "property")?;
        Ok(Self {
            name: name.to_string(),
            value: None,
            ty: TypeHint::default(),
            visibility: None,
            set_visibility: None,
            is_static: false,
            is_readonly: false,
            is_final: false,
            is_abstract: false,
            hooks: Hooks::default(),
            doc: None,
            attributes: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn ty(mut self, ty: &str) -> Self {
        self.ty = TypeHint::parse(ty);
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.ty.nullable = nullable;
        self
    }

    pub fn visibility(mut self, vis: Visibility) -> Self {
        self.visibility = Some(vis);
        self
    }

    pub fn public(self) -> Self {
        self.visibility(Visibility::Public)
    }

    pub fn protected(self) -> Self {
        self.visibility(Visibility::Protected)
    }

    pub fn private(self) -> Self {
        self.visibility(Visibility::Private)
    }

    pub fn set_visibility(mut self, vis: Visibility) -> Self {
        self.set_visibility = Some(vis);
        self
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.is_readonly = true;
        self
    }

    pub fn final_(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn hook(mut self, ty: HookType, hook: PropertyHook) -> Self {
        self.hooks.add(ty, hook);
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn attribute(mut self, attr: Attribute) -> Self {
        self.attributes.push(attr);
        self
    }
}

impl Member for Property {
    const KIND: MemberKind = MemberKind::Property;

    fn name(&self) -> &str {
        &self.name
    }
}
