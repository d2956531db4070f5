//! Namespaces: declarations plus the alias table they are printed against.

use indexmap::IndexMap;
use phpgen_core::{Error, MemberKind, Result};

use crate::class_like::{Class, ClassLike, Declaration, Enum, Interface, Trait};
use crate::function::Function;
use crate::names::{NameKind, NameTable};

/// A namespace with its classes, functions, and `use` aliases.
#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    names: NameTable,
    /// Print as `namespace X { ... }`.
    pub bracketed: bool,
    classes: IndexMap<String, ClassLike>,
    functions: IndexMap<String, Function>,
}

impl Namespace {
    /// Create a namespace; `""` is the global namespace.
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            names: NameTable::new(name)?,
            bracketed: false,
            classes: IndexMap::new(),
            functions: IndexMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        self.names.namespace()
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    pub fn names_mut(&mut self) -> &mut NameTable {
        &mut self.names
    }

    /// `use Name [as Alias];`
    pub fn add_use(&mut self, name: &str, alias: Option<&str>) -> Result<String> {
        self.names.register(name, alias, NameKind::Type)
    }

    /// `use function name [as alias];`
    pub fn add_use_function(&mut self, name: &str, alias: Option<&str>) -> Result<String> {
        self.names.register(name, alias, NameKind::Function)
    }

    /// `use const NAME [as ALIAS];`
    pub fn add_use_constant(&mut self, name: &str, alias: Option<&str>) -> Result<String> {
        self.names.register(name, alias, NameKind::Constant)
    }

    /// Add a class-like declaration. Names are unique case-insensitively.
    pub fn add(&mut self, class: impl Into<ClassLike>) -> Result<&mut ClassLike> {
        let class = class.into();
        let key = class.name().to_ascii_lowercase();
        if self.classes.contains_key(&key) {
            return Err(Error::duplicate(MemberKind::Class, class.name()));
        }
        self.names.declare(class.name(), NameKind::Type)?;
        let (index, _) = self.classes.insert_full(key, class);
        Ok(&mut self.classes[index])
    }

    pub fn add_class(&mut self, class: Class) -> Result<&mut Class> {
        let name = class.name().to_string();
        self.add(class)?
            .as_class_mut()
            .ok_or_else(|| Error::not_found(MemberKind::Class, name))
    }

    pub fn add_interface(&mut self, interface: Interface) -> Result<&mut Interface> {
        let name = interface.name().to_string();
        match self.add(interface)? {
            ClassLike::Interface(i) => Ok(i),
            _ => Err(Error::not_found(MemberKind::Class, name)),
        }
    }

    pub fn add_trait(&mut self, tr: Trait) -> Result<&mut Trait> {
        let name = tr.name().to_string();
        match self.add(tr)? {
            ClassLike::Trait(t) => Ok(t),
            _ => Err(Error::not_found(MemberKind::Class, name)),
        }
    }

    pub fn add_enum(&mut self, en: Enum) -> Result<&mut Enum> {
        let name = en.name().to_string();
        self.add(en)?
            .as_enum_mut()
            .ok_or_else(|| Error::not_found(MemberKind::Class, name))
    }

    pub fn add_function(&mut self, function: Function) -> Result<&mut Function> {
        let key = function.name().to_ascii_lowercase();
        if self.functions.contains_key(&key) {
            return Err(Error::duplicate(MemberKind::Function, function.name()));
        }
        self.names.declare(function.name(), NameKind::Function)?;
        let (index, _) = self.functions.insert_full(key, function);
        Ok(&mut self.functions[index])
    }

    pub fn class(&self, name: &str) -> Result<&ClassLike> {
        self.classes
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| Error::not_found(MemberKind::Class, name))
    }

    pub fn class_mut(&mut self, name: &str) -> Result<&mut ClassLike> {
        self.classes
            .get_mut(&name.to_ascii_lowercase())
            .ok_or_else(|| Error::not_found(MemberKind::Class, name))
    }

    pub fn function(&self, name: &str) -> Result<&Function> {
        self.functions
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| Error::not_found(MemberKind::Function, name))
    }

    pub fn remove_class(&mut self, name: &str) -> Option<ClassLike> {
        let removed = self.classes.shift_remove(&name.to_ascii_lowercase());
        if removed.is_some() {
            self.names.undeclare(name, NameKind::Type);
        }
        removed
    }

    pub fn remove_function(&mut self, name: &str) -> Option<Function> {
        let removed = self.functions.shift_remove(&name.to_ascii_lowercase());
        if removed.is_some() {
            self.names.undeclare(name, NameKind::Function);
        }
        removed
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassLike> {
        self.classes.values()
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.values()
    }

    /// No declarations (aliases alone do not count).
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.functions.is_empty()
    }

    pub fn resolve(&self, name: &str, kind: NameKind) -> String {
        self.names.resolve(name, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_lookup() {
        let mut ns = Namespace::new("Geo").unwrap();
        ns.add_class(Class::new("Point").unwrap()).unwrap();
        ns.add_function(Function::new("distance").unwrap()).unwrap();

        assert_eq!(ns.class("point").unwrap().name(), "Point");
        assert!(ns.function("Distance").is_ok());
        assert!(!ns.is_empty());
        assert_eq!(ns.classes().count(), 1);
    }

    #[test]
    fn test_duplicate_class() {
        let mut ns = Namespace::new("Geo").unwrap();
        ns.add_class(Class::new("Point").unwrap()).unwrap();
        let err = ns.add_interface(Interface::new("POINT").unwrap()).unwrap_err();
        assert!(matches!(
            *err,
            Error::DuplicateMember {
                kind: MemberKind::Class,
                ..
            }
        ));
    }

    #[test]
    fn test_declared_class_blocks_alias() {
        let mut ns = Namespace::new("Geo").unwrap();
        ns.add_use("Lib\\Shape", None).unwrap();
        assert!(ns.add_class(Class::new("Shape").unwrap()).is_err());

        ns.add_class(Class::new("Line").unwrap()).unwrap();
        assert_eq!(ns.add_use("Other\\Line", None).unwrap(), "OtherLine");

        ns.remove_class("line");
        assert_eq!(ns.add_use("Third\\Line", None).unwrap(), "Line");
    }

    #[test]
    fn test_mutate_after_adding() {
        let mut ns = Namespace::new("").unwrap();
        ns.add_enum(Enum::new("Suit").unwrap()).unwrap();
        ns.class_mut("Suit")
            .unwrap()
            .as_enum_mut()
            .unwrap()
            .add_case(crate::EnumCase::new("Hearts").unwrap())
            .unwrap();
        let ClassLike::Enum(suit) = ns.class("Suit").unwrap() else {
            panic!("expected enum");
        };
        assert_eq!(suit.cases.len(), 1);
        assert_eq!(suit.name(), "Suit");
    }
}
