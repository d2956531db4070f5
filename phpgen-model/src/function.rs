//! Functions, methods, closures, and their parameters.

use phpgen_core::naming::{check_identifier, check_type_name};
use phpgen_core::{MemberKind, Result};
use phpgen_dumper::{Dumper, Value};

use crate::member::{Member, MemberMap};
use crate::property::{HookType, Hooks, PropertyHook};
use crate::{Attribute, TypeHint, Visibility};

/// Property half of a promoted constructor parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Promotion {
    pub visibility: Visibility,
    pub set_visibility: Option<Visibility>,
    pub is_readonly: bool,
    pub is_final: bool,
    pub hooks: Hooks,
}

/// A function or method parameter, optionally promoted to a property.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    pub ty: TypeHint,
    pub by_ref: bool,
    pub default: Option<Value>,
    pub doc: Option<String>,
    pub attributes: Vec<Attribute>,
    pub promotion: Option<Promotion>,
}

impl Parameter {
    pub fn new(name: &str) -> Result<Self> {
        check_identifier(name, "parameter")?;
        Ok(Self {
            name: name.to_string(),
            ty: TypeHint::default(),
            by_ref: false,
            default: None,
            doc: None,
            attributes: Vec::new(),
            promotion: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(mut self, ty: &str) -> Self {
        self.ty = TypeHint::parse(ty);
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.ty.nullable = nullable;
        self
    }

    pub fn by_ref(mut self) -> Self {
        self.by_ref = true;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
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

    fn promotion_mut(&mut self) -> &mut Promotion {
        self.promotion.get_or_insert_with(Promotion::default)
    }

    /// Promote to a property with the given visibility.
    pub fn promote(mut self, vis: Visibility) -> Self {
        self.promotion_mut().visibility = vis;
        self
    }

    /// Promote as a read-only property.
    pub fn readonly(mut self) -> Self {
        self.promotion_mut().is_readonly = true;
        self
    }

    pub fn set_visibility(mut self, vis: Visibility) -> Self {
        self.promotion_mut().set_visibility = Some(vis);
        self
    }

    pub fn final_(mut self) -> Self {
        self.promotion_mut().is_final = true;
        self
    }

    /// Attach a hook to the promoted property.
    pub fn hook(mut self, ty: HookType, hook: PropertyHook) -> Self {
        self.promotion_mut().hooks.add(ty, hook);
        self
    }

    pub fn is_promoted(&self) -> bool {
        self.promotion.is_some()
    }
}

impl Member for Parameter {
    const KIND: MemberKind = MemberKind::Parameter;

    fn name(&self) -> &str {
        &self.name
    }
}

/// Parameter list and return declaration shared by everything callable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    pub parameters: MemberMap<Parameter>,
    pub return_type: TypeHint,
    /// `function &name()`.
    pub returns_ref: bool,
    /// The last parameter is `...$name`.
    pub variadic: bool,
}

/// Shared builder surface of functions, methods, and closures.
pub trait FunctionLike {
    fn signature(&self) -> &Signature;

    fn signature_mut(&mut self) -> &mut Signature;

    /// Replace the body text.
    fn set_body(&mut self, code: String);

    fn parameters(&self) -> &MemberMap<Parameter> {
        &self.signature().parameters
    }

    fn add_parameter(&mut self, param: Parameter) -> Result<&mut Parameter> {
        self.insert_parameter(param, false)
    }

    /// Add a parameter, replacing one of the same name when `overwrite` is
    /// set. A replaced parameter keeps its position.
    fn insert_parameter(&mut self, param: Parameter, overwrite: bool) -> Result<&mut Parameter> {
        self.signature_mut().parameters.add(param, overwrite)
    }

    fn param(mut self, param: Parameter) -> Result<Self>
    where
        Self: Sized,
    {
        self.add_parameter(param)?;
        Ok(self)
    }

    fn returns(mut self, ty: &str) -> Self
    where
        Self: Sized,
    {
        self.signature_mut().return_type = TypeHint::parse(ty);
        self
    }

    fn returns_ref(mut self) -> Self
    where
        Self: Sized,
    {
        self.signature_mut().returns_ref = true;
        self
    }

    fn variadic(mut self) -> Self
    where
        Self: Sized,
    {
        self.signature_mut().variadic = true;
        self
    }

    fn body(mut self, code: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.set_body(code.into());
        self
    }

    /// Set the body from a placeholder template, see [`Dumper::format`].
    fn body_format(mut self, template: &str, args: &[Value]) -> Result<Self>
    where
        Self: Sized,
    {
        let code = Dumper::new().format(template, args)?;
        self.set_body(code);
        Ok(self)
    }
}

/// A namespace-level function.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    name: String,
    pub signature: Signature,
    pub body: String,
    pub doc: Option<String>,
    pub attributes: Vec<Attribute>,
}

impl Function {
    pub fn new(name: &str) -> Result<Self> {
        check_type_name(name, "function")?;
        Ok(Self {
            name: name.to_string(),
            signature: Signature::default(),
            body: String::new(),
            doc: None,
            attributes: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
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

impl FunctionLike for Function {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn signature_mut(&mut self) -> &mut Signature {
        &mut self.signature
    }

    fn set_body(&mut self, code: String) {
        self.body = code;
    }
}

/// A class-like method.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    name: String,
    pub signature: Signature,
    /// `None` declares the method without a body.
    pub body: Option<String>,
    /// Public unless changed; `None` omits the keyword.
    pub visibility: Option<Visibility>,
    pub is_static: bool,
    pub is_final: bool,
    pub is_abstract: bool,
    pub doc: Option<String>,
    pub attributes: Vec<Attribute>,
}

impl Method {
    pub fn new(name: &str) -> Result<Self> {
        check_identifier(name, "method")?;
        Ok(Self {
            name: name.to_string(),
            signature: Signature::default(),
            body: Some(String::new()),
            visibility: Some(Visibility::Public),
            is_static: false,
            is_final: false,
            is_abstract: false,
            doc: None,
            attributes: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_constructor(&self) -> bool {
        self.name.eq_ignore_ascii_case("__construct")
    }

    /// Declare without a body.
    pub fn no_body(mut self) -> Self {
        self.body = None;
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

    pub fn static_(mut self) -> Self {
        self.is_static = true;
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

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn attribute(mut self, attr: Attribute) -> Self {
        self.attributes.push(attr);
        self
    }

    /// Add a parameter promoted to a public property.
    pub fn add_promoted_parameter(&mut self, name: &str) -> Result<&mut Parameter> {
        self.add_parameter(Parameter::new(name)?.promote(Visibility::Public))
    }
}

impl FunctionLike for Method {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn signature_mut(&mut self) -> &mut Signature {
        &mut self.signature
    }

    fn set_body(&mut self, code: String) {
        self.body = Some(code);
    }
}

impl Member for Method {
    const KIND: MemberKind = MemberKind::Method;

    fn name(&self) -> &str {
        &self.name
    }

    fn key(name: &str) -> String {
        name.to_ascii_lowercase()
    }
}

/// A variable captured by a closure's `use (...)` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureUse {
    name: String,
    pub by_ref: bool,
}

impl ClosureUse {
    pub fn new(name: &str) -> Result<Self> {
        check_identifier(name, "closure variable")?;
        Ok(Self {
            name: name.to_string(),
            by_ref: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An anonymous function, printable as a closure or an arrow function.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Closure {
    pub signature: Signature,
    pub body: String,
    pub uses: Vec<ClosureUse>,
    pub is_static: bool,
    pub attributes: Vec<Attribute>,
}

impl Closure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture a variable by value.
    pub fn capture(mut self, name: &str) -> Result<Self> {
        self.uses.push(ClosureUse::new(name)?);
        Ok(self)
    }

    /// Capture a variable by reference.
    pub fn capture_ref(mut self, name: &str) -> Result<Self> {
        let mut binding = ClosureUse::new(name)?;
        binding.by_ref = true;
        self.uses.push(binding);
        Ok(self)
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn attribute(mut self, attr: Attribute) -> Self {
        self.attributes.push(attr);
        self
    }
}

impl FunctionLike for Closure {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn signature_mut(&mut self) -> &mut Signature {
        &mut self.signature
    }

    fn set_body(&mut self, code: String) {
        self.body = code;
    }
}

#[cfg(test)]
mod tests {
    use phpgen_core::Error;

    use super::*;

    #[test]
    fn test_method_builder() {
        let method = Method::new("length")
            .unwrap()
            .returns("?float")
            .body("return 1.0;")
            .static_();
        assert_eq!(method.body.as_deref(), Some("return 1.0;"));
        assert!(method.signature.return_type.nullable);
        assert!(method.is_static);
    }

    #[test]
    fn test_method_key_is_case_insensitive() {
        assert_eq!(Method::key("FooBar"), "foobar");
        assert_eq!(<Parameter as Member>::key("FooBar"), "FooBar");
    }

    #[test]
    fn test_duplicate_parameter() {
        let err = Method::new("f")
            .unwrap()
            .param(Parameter::new("a").unwrap())
            .unwrap()
            .param(Parameter::new("a").unwrap())
            .unwrap_err();
        assert!(matches!(
            *err,
            Error::DuplicateMember {
                kind: MemberKind::Parameter,
                ..
            }
        ));
    }

    #[test]
    fn test_promotion() {
        let param = Parameter::new("x").unwrap().ty("float").readonly();
        let promotion = param.promotion.as_ref().unwrap();
        assert_eq!(promotion.visibility, Visibility::Public);
        assert!(promotion.is_readonly);

        let mut ctor = Method::new("__construct").unwrap();
        ctor.add_promoted_parameter("y").unwrap();
        assert!(ctor.is_constructor());
        assert!(ctor.parameters().get("y").unwrap().is_promoted());
    }

    #[test]
    fn test_body_format() {
        let f = Function::new("greet")
            .unwrap()
            .body_format("return ?;", &[Value::from("hi")])
            .unwrap();
        assert_eq!(f.body, "return 'hi';");
    }

    #[test]
    fn test_function_name_cannot_be_keyword() {
        assert!(Function::new("list").is_err());
        assert!(Method::new("list").is_ok());
    }

    #[test]
    fn test_closure_captures() {
        let closure = Closure::new().capture("a").unwrap().capture_ref("b").unwrap();
        let refs: Vec<_> = closure.uses.iter().map(|u| (u.name(), u.by_ref)).collect();
        assert_eq!(refs, vec![("a", false), ("b", true)]);
    }
}
