use phpgen_core::naming::check_identifier;
use phpgen_core::{MemberKind, Result};
use phpgen_dumper::Value;

use crate::member::Member;
use crate::{Attribute, TypeHint, Visibility};

/// Class constant: `final public const int NAME = value;`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    name: String,
    pub value: Value,
    pub ty: TypeHint,
    pub visibility: Option<Visibility>,
    pub is_final: bool,
    pub doc: Option<String>,
    pub attributes: Vec<Attribute>,
}

impl Constant {
    pub fn new(name: &str, value: impl Into<Value>) -> Result<Self> {
        check_identifier(name, "constant")?;
        Ok(Self {
            name: name.to_string(),
            value: value.into(),
            ty: TypeHint::default(),
            visibility: None,
            is_final: false,
            doc: None,
            attributes: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(mut self, ty: &str) -> Self {
        self.ty = TypeHint::parse(ty);
        self
    }

    pub fn visibility(mut self, vis: Visibility) -> Self {
        self.visibility = Some(vis);
        self
    }

    pub fn private(self) -> Self {
        self.visibility(Visibility::Private)
    }

    pub fn final_(mut self) -> Self {
        self.is_final = true;
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

impl Member for Constant {
    const KIND: MemberKind = MemberKind::Constant;

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let c = Constant::new("MAX", 10).unwrap().ty("int").private().final_();
        assert_eq!(c.name(), "MAX");
        assert_eq!(c.value, Value::Int(10));
        assert_eq!(c.visibility, Some(Visibility::Private));
        assert!(c.is_final);
        assert_eq!(c.ty.name(), Some("int"));
    }

    #[test]
    fn test_invalid_name() {
        assert!(Constant::new("1ST", 1).is_err());
    }
}
