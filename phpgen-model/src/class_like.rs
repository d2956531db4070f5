//! Classes, interfaces, traits, and enums.

use phpgen_core::naming::{check_identifier, check_qualified_name, check_type_name};
use phpgen_core::{MemberKind, Result};
use phpgen_dumper::Value;

use crate::member::{Member, MemberMap};
use crate::{Attribute, Constant, Method, Property};

/// Fields every class-like declaration carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    name: String,
    pub doc: Option<String>,
    pub attributes: Vec<Attribute>,
    pub constants: MemberMap<Constant>,
    pub methods: MemberMap<Method>,
}

impl Decl {
    fn new(name: &str, context: &str) -> Result<Self> {
        check_type_name(name, context)?;
        Ok(Self {
            name: name.to_string(),
            doc: None,
            attributes: Vec::new(),
            constants: MemberMap::new(),
            methods: MemberMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Shared surface of the class-like variants.
pub trait Declaration {
    fn decl(&self) -> &Decl;

    fn decl_mut(&mut self) -> &mut Decl;

    fn name(&self) -> &str {
        self.decl().name()
    }

    fn constants(&self) -> &MemberMap<Constant> {
        &self.decl().constants
    }

    fn methods(&self) -> &MemberMap<Method> {
        &self.decl().methods
    }

    fn add_constant(&mut self, constant: Constant) -> Result<&mut Constant> {
        self.insert_constant(constant, false)
    }

    /// Add a constant, replacing one of the same name when `overwrite` is set.
    fn insert_constant(&mut self, constant: Constant, overwrite: bool) -> Result<&mut Constant> {
        self.decl_mut().constants.add(constant, overwrite)
    }

    fn add_method(&mut self, method: Method) -> Result<&mut Method> {
        self.insert_method(method, false)
    }

    /// Add a method, replacing one of the same name when `overwrite` is set.
    fn insert_method(&mut self, method: Method, overwrite: bool) -> Result<&mut Method> {
        self.decl_mut().methods.add(method, overwrite)
    }

    fn method(&self, name: &str) -> Result<&Method> {
        self.decl().methods.get(name)
    }

    fn method_mut(&mut self, name: &str) -> Result<&mut Method> {
        self.decl_mut().methods.get_mut(name)
    }

    fn has_method(&self, name: &str) -> bool {
        self.decl().methods.has(name)
    }

    fn remove_method(&mut self, name: &str) -> Option<Method> {
        self.decl_mut().methods.remove(name)
    }

    fn with_constant(mut self, constant: Constant) -> Result<Self>
    where
        Self: Sized,
    {
        self.add_constant(constant)?;
        Ok(self)
    }

    fn with_method(mut self, method: Method) -> Result<Self>
    where
        Self: Sized,
    {
        self.add_method(method)?;
        Ok(self)
    }

    fn doc(mut self, doc: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.decl_mut().doc = Some(doc.into());
        self
    }

    fn attribute(mut self, attr: Attribute) -> Self
    where
        Self: Sized,
    {
        self.decl_mut().attributes.push(attr);
        self
    }
}

/// Class-likes that can declare properties.
pub trait HasProperties: Declaration {
    fn properties(&self) -> &MemberMap<Property>;

    fn properties_mut(&mut self) -> &mut MemberMap<Property>;

    fn add_property(&mut self, property: Property) -> Result<&mut Property> {
        self.insert_property(property, false)
    }

    fn insert_property(&mut self, property: Property, overwrite: bool) -> Result<&mut Property> {
        self.properties_mut().add(property, overwrite)
    }

    fn property(&self, name: &str) -> Result<&Property> {
        self.properties().get(name)
    }

    fn with_property(mut self, property: Property) -> Result<Self>
    where
        Self: Sized,
    {
        self.add_property(property)?;
        Ok(self)
    }
}

/// Class-likes that can use traits.
pub trait HasTraits: Declaration {
    fn traits(&self) -> &MemberMap<TraitUse>;

    fn traits_mut(&mut self) -> &mut MemberMap<TraitUse>;

    fn add_trait(&mut self, name: &str) -> Result<&mut TraitUse> {
        self.insert_trait(TraitUse::new(name)?, false)
    }

    fn insert_trait(&mut self, tr: TraitUse, overwrite: bool) -> Result<&mut TraitUse> {
        self.traits_mut().add(tr, overwrite)
    }

    fn with_trait(mut self, name: &str) -> Result<Self>
    where
        Self: Sized,
    {
        self.add_trait(name)?;
        Ok(self)
    }
}

/// `use SomeTrait { ... }` inside a class body.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitUse {
    name: String,
    /// Conflict resolution clauses, emitted verbatim.
    pub resolutions: Vec<String>,
    pub doc: Option<String>,
}

impl TraitUse {
    pub fn new(name: &str) -> Result<Self> {
        check_qualified_name(name, "trait", true)?;
        Ok(Self {
            name: name.to_string(),
            resolutions: Vec::new(),
            doc: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a clause such as `sayHello as protected`.
    pub fn resolution(mut self, clause: impl Into<String>) -> Self {
        self.resolutions.push(clause.into());
        self
    }
}

impl Member for TraitUse {
    const KIND: MemberKind = MemberKind::TraitUse;

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    decl: Decl,
    pub is_final: bool,
    pub is_abstract: bool,
    pub is_readonly: bool,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub traits: MemberMap<TraitUse>,
    pub properties: MemberMap<Property>,
}

impl Class {
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            decl: Decl::new(name, "class")?,
            is_final: false,
            is_abstract: false,
            is_readonly: false,
            extends: None,
            implements: Vec::new(),
            traits: MemberMap::new(),
            properties: MemberMap::new(),
        })
    }

    pub fn final_(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.is_readonly = true;
        self
    }

    pub fn extends(mut self, parent: &str) -> Result<Self> {
        check_qualified_name(parent, "class", true)?;
        self.extends = Some(parent.to_string());
        Ok(self)
    }

    pub fn implement(mut self, interface: &str) -> Result<Self> {
        check_qualified_name(interface, "interface", true)?;
        self.implements.push(interface.to_string());
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    decl: Decl,
    pub extends: Vec<String>,
    /// Property contracts; each must declare at least one hook.
    pub properties: MemberMap<Property>,
}

impl Interface {
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            decl: Decl::new(name, "interface")?,
            extends: Vec::new(),
            properties: MemberMap::new(),
        })
    }

    pub fn extends(mut self, parent: &str) -> Result<Self> {
        check_qualified_name(parent, "interface", true)?;
        self.extends.push(parent.to_string());
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trait {
    decl: Decl,
    pub traits: MemberMap<TraitUse>,
    pub properties: MemberMap<Property>,
}

impl Trait {
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            decl: Decl::new(name, "trait")?,
            traits: MemberMap::new(),
            properties: MemberMap::new(),
        })
    }
}

/// A case of an enum, optionally backed by a scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumCase {
    name: String,
    pub value: Option<Value>,
    pub doc: Option<String>,
    pub attributes: Vec<Attribute>,
}

impl EnumCase {
    pub fn new(name: &str) -> Result<Self> {
        check_identifier(name, "enum case")?;
        Ok(Self {
            name: name.to_string(),
            value: None,
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

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn attribute(mut self, attr: Attribute) -> Self {
        self.attributes.push(attr);
        self
    }
}

impl Member for EnumCase {
    const KIND: MemberKind = MemberKind::Case;

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
    decl: Decl,
    /// Explicit backing type; inferred from the cases when unset.
    pub backing: Option<String>,
    pub implements: Vec<String>,
    pub traits: MemberMap<TraitUse>,
    pub cases: MemberMap<EnumCase>,
}

impl Enum {
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            decl: Decl::new(name, "enum")?,
            backing: None,
            implements: Vec::new(),
            traits: MemberMap::new(),
            cases: MemberMap::new(),
        })
    }

    pub fn backing(mut self, ty: impl Into<String>) -> Self {
        self.backing = Some(ty.into());
        self
    }

    pub fn implement(mut self, interface: &str) -> Result<Self> {
        check_qualified_name(interface, "interface", true)?;
        self.implements.push(interface.to_string());
        Ok(self)
    }

    pub fn add_case(&mut self, case: EnumCase) -> Result<&mut EnumCase> {
        self.cases.add(case, false)
    }

    pub fn with_case(mut self, case: EnumCase) -> Result<Self> {
        self.add_case(case)?;
        Ok(self)
    }

    /// The backing type: explicit, or taken from the first case holding an
    /// `int` or `string` value.
    pub fn backing_type(&self) -> Option<&str> {
        if let Some(ty) = &self.backing {
            return Some(ty);
        }
        self.cases.iter().find_map(|case| match case.value {
            Some(Value::Int(_)) => Some("int"),
            Some(Value::String(_)) => Some("string"),
            _ => None,
        })
    }
}

macro_rules! impl_declaration {
    ($($ty:ty),*) => {$(
        impl Declaration for $ty {
            fn decl(&self) -> &Decl {
                &self.decl
            }

            fn decl_mut(&mut self) -> &mut Decl {
                &mut self.decl
            }
        }
    )*};
}

impl_declaration!(Class, Interface, Trait, Enum);

macro_rules! impl_has_properties {
    ($($ty:ty),*) => {$(
        impl HasProperties for $ty {
            fn properties(&self) -> &MemberMap<Property> {
                &self.properties
            }

            fn properties_mut(&mut self) -> &mut MemberMap<Property> {
                &mut self.properties
            }
        }
    )*};
}

impl_has_properties!(Class, Interface, Trait);

macro_rules! impl_has_traits {
    ($($ty:ty),*) => {$(
        impl HasTraits for $ty {
            fn traits(&self) -> &MemberMap<TraitUse> {
                &self.traits
            }

            fn traits_mut(&mut self) -> &mut MemberMap<TraitUse> {
                &mut self.traits
            }
        }
    )*};
}

impl_has_traits!(Class, Trait, Enum);

/// Any of the four class-like declarations.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassLike {
    Class(Class),
    Interface(Interface),
    Trait(Trait),
    Enum(Enum),
}

impl ClassLike {
    pub fn decl(&self) -> &Decl {
        match self {
            Self::Class(c) => c.decl(),
            Self::Interface(i) => i.decl(),
            Self::Trait(t) => t.decl(),
            Self::Enum(e) => e.decl(),
        }
    }

    pub fn decl_mut(&mut self) -> &mut Decl {
        match self {
            Self::Class(c) => c.decl_mut(),
            Self::Interface(i) => i.decl_mut(),
            Self::Trait(t) => t.decl_mut(),
            Self::Enum(e) => e.decl_mut(),
        }
    }

    pub fn name(&self) -> &str {
        self.decl().name()
    }

    /// Declaration keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Class(_) => "class",
            Self::Interface(_) => "interface",
            Self::Trait(_) => "trait",
            Self::Enum(_) => "enum",
        }
    }

    pub fn properties(&self) -> Option<&MemberMap<Property>> {
        match self {
            Self::Class(c) => Some(&c.properties),
            Self::Interface(i) => Some(&i.properties),
            Self::Trait(t) => Some(&t.properties),
            Self::Enum(_) => None,
        }
    }

    pub fn traits(&self) -> Option<&MemberMap<TraitUse>> {
        match self {
            Self::Class(c) => Some(&c.traits),
            Self::Trait(t) => Some(&t.traits),
            Self::Enum(e) => Some(&e.traits),
            Self::Interface(_) => None,
        }
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, Self::Interface(_))
    }

    pub fn as_class(&self) -> Option<&Class> {
        match self {
            Self::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut Class> {
        match self {
            Self::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_enum_mut(&mut self) -> Option<&mut Enum> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Class> for ClassLike {
    fn from(c: Class) -> Self {
        Self::Class(c)
    }
}

impl From<Interface> for ClassLike {
    fn from(i: Interface) -> Self {
        Self::Interface(i)
    }
}

impl From<Trait> for ClassLike {
    fn from(t: Trait) -> Self {
        Self::Trait(t)
    }
}

impl From<Enum> for ClassLike {
    fn from(e: Enum) -> Self {
        Self::Enum(e)
    }
}
