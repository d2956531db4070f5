//! A source file: header flags plus an ordered set of namespaces.

use indexmap::IndexMap;
use phpgen_core::naming::{extract_namespace, extract_short_name, trim_leading_separator};
use phpgen_core::{Error, MemberKind, Result};

use crate::class_like::{Class, ClassLike, Enum, Interface, Trait};
use crate::function::Function;
use crate::namespace::Namespace;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct File {
    pub doc: Option<String>,
    /// Emit `declare(strict_types=1);`.
    pub strict_types: bool,
    namespaces: IndexMap<String, Namespace>,
}

impl File {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn strict_types(mut self) -> Self {
        self.strict_types = true;
        self
    }

    /// Get or create the namespace `name`.
    pub fn add_namespace(&mut self, name: &str) -> Result<&mut Namespace> {
        let name = trim_leading_separator(name);
        if !self.namespaces.contains_key(name) {
            self.namespaces.insert(name.to_string(), Namespace::new(name)?);
        }
        self.namespaces
            .get_mut(name)
            .ok_or_else(|| Error::not_found(MemberKind::Namespace, name))
    }

    pub fn namespace(&self, name: &str) -> Result<&Namespace> {
        self.namespaces
            .get(trim_leading_separator(name))
            .ok_or_else(|| Error::not_found(MemberKind::Namespace, name))
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.values()
    }

    /// Whether both the global namespace and a named one hold declarations,
    /// which requires the bracketed namespace syntax.
    pub fn has_mixed_namespaces(&self) -> bool {
        let populated: Vec<_> = self.namespaces().filter(|ns| !ns.is_empty()).collect();
        populated.len() > 1 && populated.iter().any(|ns| ns.name().is_empty())
    }

    /// Add a class by fully-qualified name, creating its namespace.
    pub fn add_class(&mut self, name: &str) -> Result<&mut Class> {
        let class = Class::new(extract_short_name(name))?;
        self.add_namespace(extract_namespace(name))?.add_class(class)
    }

    pub fn add_interface(&mut self, name: &str) -> Result<&mut Interface> {
        let interface = Interface::new(extract_short_name(name))?;
        self.add_namespace(extract_namespace(name))?
            .add_interface(interface)
    }

    pub fn add_trait(&mut self, name: &str) -> Result<&mut Trait> {
        let tr = Trait::new(extract_short_name(name))?;
        self.add_namespace(extract_namespace(name))?.add_trait(tr)
    }

    pub fn add_enum(&mut self, name: &str) -> Result<&mut Enum> {
        let en = Enum::new(extract_short_name(name))?;
        self.add_namespace(extract_namespace(name))?.add_enum(en)
    }

    pub fn add_function(&mut self, name: &str) -> Result<&mut Function> {
        let function = Function::new(extract_short_name(name))?;
        self.add_namespace(extract_namespace(name))?
            .add_function(function)
    }

    /// All class-likes keyed by fully-qualified name.
    pub fn classes(&self) -> impl Iterator<Item = (String, &ClassLike)> {
        self.namespaces().flat_map(|ns| {
            ns.classes().map(move |class| (qualified(ns.name(), class.name()), class))
        })
    }

    /// All functions keyed by fully-qualified name.
    pub fn functions(&self) -> impl Iterator<Item = (String, &Function)> {
        self.namespaces().flat_map(|ns| {
            ns.functions()
                .map(move |function| (qualified(ns.name(), function.name()), function))
        })
    }
}

fn qualified(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}\\{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_by_qualified_name() {
        let mut file = File::new().strict_types();
        file.add_class("Geo\\Point").unwrap();
        file.add_enum("Geo\\Suit").unwrap();
        file.add_function("Util\\helper").unwrap();
        file.add_interface("\\Shape").unwrap();

        let classes: Vec<_> = file.classes().map(|(name, _)| name).collect();
        assert_eq!(classes, vec!["Geo\\Point", "Geo\\Suit", "Shape"]);
        let functions: Vec<_> = file.functions().map(|(name, _)| name).collect();
        assert_eq!(functions, vec!["Util\\helper"]);
        assert_eq!(file.namespaces().count(), 3);
    }

    #[test]
    fn test_reuses_namespace() {
        let mut file = File::new();
        file.add_class("App\\A").unwrap();
        file.add_class("App\\B").unwrap();
        assert_eq!(file.namespace("App").unwrap().classes().count(), 2);
        assert!(file.add_class("App\\a").is_err());
    }

    #[test]
    fn test_mixed_namespaces() {
        let mut file = File::new();
        file.add_class("App\\A").unwrap();
        assert!(!file.has_mixed_namespaces());
        file.add_namespace("").unwrap();
        assert!(!file.has_mixed_namespaces());
        file.add_function("helper").unwrap();
        assert!(file.has_mixed_namespaces());
    }

    #[test]
    fn test_invalid_names() {
        let mut file = File::new();
        assert!(file.add_class("App\\class").is_err());
        assert!(file.add_class("App\\\\A").is_err());
    }
}
