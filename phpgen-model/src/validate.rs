//! Structural checks run before printing.
//!
//! Construction never requires a valid model; these rules are checked only
//! when [`Validate::validate`] is called, which the printer does for every
//! declaration it renders.

use phpgen_core::{Error, Result};
use phpgen_dumper::Value;

use crate::class_like::{Class, ClassLike, Declaration, Enum, Interface, Trait};
use crate::function::{Closure, Function, FunctionLike, Method, Parameter, Signature};
use crate::member::MemberMap;
use crate::property::{HookType, Hooks, Property};

/// A model entity with structural invariants.
pub trait Validate {
    /// Check the invariants. Idempotent; never mutates.
    fn validate(&self) -> Result<()>;
}

/// Label of the entity an error is reported against, e.g. `Point::$x`.
fn member_label(owner: Option<&str>, member: &str) -> String {
    match owner {
        Some(owner) => format!("{owner}::{member}"),
        None => member.to_string(),
    }
}

fn violation(entity: String, message: &str) -> Box<Error> {
    Error::invariant(entity, message)
}

fn check_hooks(hooks: &Hooks, entity: &str) -> Result<()> {
    for (ty, hook) in hooks.iter() {
        let label = format!("{entity} hook '{ty}'");
        match ty {
            HookType::Get if !hook.parameters.is_empty() => {
                return Err(violation(label, "get hook cannot have parameters"));
            }
            HookType::Set if hook.parameters.len() > 1 => {
                return Err(violation(label, "set hook can have at most one parameter"));
            }
            _ => {}
        }
        if hook.is_abstract && hook.is_final {
            return Err(violation(label, "hook cannot be abstract and final at the same time"));
        }
    }
    Ok(())
}

fn check_property(property: &Property, owner: Option<&str>) -> Result<()> {
    let entity = format!("Property {}", member_label(owner, &format!("${}", property.name())));
    let typed = property.ty.is_set();

    if property.is_readonly {
        if !typed {
            return Err(violation(entity, "read-only properties are only supported on typed properties"));
        }
        if property.is_static {
            return Err(violation(entity, "read-only properties cannot be static"));
        }
        if !property.hooks.is_empty() {
            return Err(violation(entity, "read-only properties cannot have hooks"));
        }
    }
    if property.set_visibility.is_some() && !typed {
        return Err(violation(entity, "asymmetric visibility is only supported on typed properties"));
    }
    if !property.hooks.is_empty() && property.value.is_some() {
        return Err(violation(entity, "properties with hooks cannot have a default value"));
    }
    if property.is_abstract && property.hooks.is_empty() {
        return Err(violation(entity, "abstract properties must declare at least one hook"));
    }
    check_hooks(&property.hooks, &entity)
}

fn check_parameter(param: &Parameter, owner: &str) -> Result<()> {
    let Some(promotion) = &param.promotion else {
        return Ok(());
    };
    let entity = format!("Parameter ${} of {owner}", param.name());
    let typed = param.ty.is_set();

    if promotion.is_readonly {
        if !typed {
            return Err(violation(entity, "read-only properties are only supported on typed properties"));
        }
        if !promotion.hooks.is_empty() {
            return Err(violation(entity, "read-only properties cannot have hooks"));
        }
    }
    if promotion.set_visibility.is_some() && !typed {
        return Err(violation(entity, "asymmetric visibility is only supported on typed properties"));
    }
    if !promotion.hooks.is_empty() && param.default.is_some() {
        return Err(violation(entity, "properties with hooks cannot have a default value"));
    }
    check_hooks(&promotion.hooks, &entity)
}

fn check_signature(signature: &Signature, entity: &str) -> Result<()> {
    if signature.variadic && signature.parameters.is_empty() {
        return Err(violation(entity.to_string(), "variadic function must have at least one parameter"));
    }
    signature
        .parameters
        .iter()
        .try_for_each(|param| check_parameter(param, entity))
}

fn check_method(method: &Method, owner: Option<&str>, in_interface: bool) -> Result<()> {
    let entity = format!("Method {}()", member_label(owner, method.name()));
    let signature = method.signature();

    if method.is_abstract && (method.is_final || method.visibility.is_some_and(|v| v.is_private())) {
        return Err(violation(entity, "method cannot be abstract and final or private at the same time"));
    }
    if !method.is_constructor() && signature.parameters.iter().any(Parameter::is_promoted) {
        return Err(violation(entity, "only the constructor can have promoted parameters"));
    }
    if signature.variadic
        && signature.parameters.last().is_some_and(Parameter::is_promoted)
    {
        return Err(violation(entity, "promoted parameter cannot be variadic"));
    }
    if in_interface {
        if method.visibility.is_some_and(|v| !v.is_public()) {
            return Err(violation(entity, "interface methods must be public"));
        }
        if method.body.as_deref().is_some_and(|b| !b.trim().is_empty()) {
            return Err(violation(entity, "interface methods cannot have a body"));
        }
    }
    check_signature(signature, &entity)
}

fn check_members(
    name: &str,
    methods: &MemberMap<Method>,
    properties: Option<&MemberMap<Property>>,
    in_interface: bool,
) -> Result<()> {
    for property in properties.into_iter().flatten() {
        check_property(property, Some(name))?;
    }
    methods
        .iter()
        .try_for_each(|method| check_method(method, Some(name), in_interface))
}

impl Validate for Property {
    fn validate(&self) -> Result<()> {
        check_property(self, None)
    }
}

impl Validate for Parameter {
    fn validate(&self) -> Result<()> {
        check_parameter(self, "function")
    }
}

impl Validate for Method {
    fn validate(&self) -> Result<()> {
        check_method(self, None, false)
    }
}

impl Validate for Function {
    fn validate(&self) -> Result<()> {
        check_signature(self.signature(), &format!("Function {}()", self.name()))
    }
}

impl Validate for Closure {
    fn validate(&self) -> Result<()> {
        check_signature(self.signature(), "Closure")
    }
}

impl Validate for Class {
    fn validate(&self) -> Result<()> {
        if self.is_abstract && self.is_final {
            return Err(violation(
                format!("Class {}", self.name()),
                "class cannot be abstract and final at the same time",
            ));
        }
        check_members(self.name(), self.methods(), Some(&self.properties), false)
    }
}

impl Validate for Interface {
    fn validate(&self) -> Result<()> {
        for property in &self.properties {
            if property.hooks.is_empty() {
                let entity = format!("Property {}::${}", self.name(), property.name());
                return Err(violation(entity, "interface properties must declare at least one hook"));
            }
        }
        check_members(self.name(), self.methods(), Some(&self.properties), true)
    }
}

impl Validate for Trait {
    fn validate(&self) -> Result<()> {
        check_members(self.name(), self.methods(), Some(&self.properties), false)
    }
}

impl Validate for Enum {
    fn validate(&self) -> Result<()> {
        let backed_by_scalar = self
            .backing
            .as_deref()
            .is_none_or(|ty| ty.eq_ignore_ascii_case("int") || ty.eq_ignore_ascii_case("string"));
        if !backed_by_scalar {
            return Err(violation(
                format!("Enum {}", self.name()),
                "backing type must be int or string",
            ));
        }
        let backing = self.backing_type().map(str::to_ascii_lowercase);
        for case in &self.cases {
            let entity = format!("Case {}::{}", self.name(), case.name());
            let matches = match (backing.as_deref(), &case.value) {
                (None, None) => true,
                (None, Some(_)) => {
                    return Err(violation(entity, "unbacked enum cases cannot have a value"));
                }
                (Some(_), None) => {
                    return Err(violation(entity, "backed enum cases must have a value"));
                }
                (Some(_), Some(Value::Literal(_))) => true,
                (Some("int"), Some(Value::Int(_))) => true,
                (Some("string"), Some(Value::String(_))) => true,
                (Some(_), Some(_)) => false,
            };
            if !matches {
                let ty = backing.as_deref().unwrap_or_default();
                let message = format!("case value does not match backing type {ty}");
                return Err(violation(entity, &message));
            }
        }
        check_members(self.name(), self.methods(), None, false)
    }
}

impl Validate for ClassLike {
    fn validate(&self) -> Result<()> {
        match self {
            Self::Class(c) => c.validate(),
            Self::Interface(i) => i.validate(),
            Self::Trait(t) => t.validate(),
            Self::Enum(e) => e.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phpgen_dumper::Literal;

    use crate::{EnumCase, HasProperties, PropertyHook, Visibility};

    fn message(err: Box<Error>) -> String {
        match *err {
            Error::Invariant { message, .. } => message,
            other => panic!("expected invariant violation, got {other}"),
        }
    }

    #[test]
    fn test_readonly_property_requires_type() {
        let untyped = Property::new("id").unwrap().readonly();
        let err = untyped.validate().unwrap_err();
        assert!(message(err).contains("typed"));

        let typed = untyped.ty("int");
        assert!(typed.validate().is_ok());
        assert!(typed.validate().is_ok());
    }

    #[test]
    fn test_readonly_static_and_hooked() {
        let prop = Property::new("id").unwrap().ty("int").readonly().static_();
        assert!(prop.validate().is_err());

        let prop = Property::new("id")
            .unwrap()
            .ty("int")
            .readonly()
            .hook(HookType::Get, PropertyHook::new().short("1"));
        assert!(prop.validate().is_err());
    }

    #[test]
    fn test_hooks_with_default_value() {
        let prop = Property::new("name")
            .unwrap()
            .ty("string")
            .value("x")
            .hook(HookType::Get, PropertyHook::new().short("$this->name"));
        let err = prop.validate().unwrap_err();
        assert!(message(err).contains("default value"));
    }

    #[test]
    fn test_asymmetric_visibility_requires_type() {
        let prop = Property::new("x").unwrap().set_visibility(Visibility::Private);
        assert!(prop.validate().is_err());
        assert!(prop.ty("int").validate().is_ok());
    }

    #[test]
    fn test_abstract_property_requires_hooks() {
        let prop = Property::new("x").unwrap().ty("int").abstract_();
        assert!(prop.validate().is_err());
        let hooked = prop.hook(HookType::Get, PropertyHook::new().abstract_());
        assert!(hooked.validate().is_ok());
    }

    #[test]
    fn test_hook_parameters() {
        let get = PropertyHook::new()
            .param(Parameter::new("v").unwrap())
            .unwrap();
        let prop = Property::new("x").unwrap().hook(HookType::Get, get);
        assert!(prop.validate().is_err());

        let set = PropertyHook::new()
            .param(Parameter::new("a").unwrap())
            .unwrap()
            .param(Parameter::new("b").unwrap())
            .unwrap();
        let prop = Property::new("x").unwrap().hook(HookType::Set, set);
        assert!(prop.validate().is_err());

        let hook = PropertyHook::new().abstract_().final_();
        let prop = Property::new("x").unwrap().hook(HookType::Get, hook);
        assert!(prop.validate().is_err());
    }

    #[test]
    fn test_abstract_final_class() {
        let class = Class::new("A").unwrap().abstract_().final_();
        let err = class.validate().unwrap_err();
        assert_eq!(err.to_string(), "Class A: class cannot be abstract and final at the same time");
    }

    #[test]
    fn test_abstract_method_rules() {
        assert!(Method::new("f").unwrap().abstract_().final_().validate().is_err());
        assert!(Method::new("f").unwrap().abstract_().private().validate().is_err());
        assert!(Method::new("f").unwrap().abstract_().protected().validate().is_ok());
    }

    #[test]
    fn test_promoted_parameters_only_in_constructor() {
        let promoted = Parameter::new("x").unwrap().promote(Visibility::Public);
        let method = Method::new("setUp").unwrap().param(promoted.clone()).unwrap();
        assert!(method.validate().is_err());

        let ctor = Method::new("__construct").unwrap().param(promoted).unwrap();
        assert!(ctor.validate().is_ok());
        assert!(ctor.variadic().validate().is_err());
    }

    #[test]
    fn test_variadic_needs_parameter() {
        assert!(Function::new("f").unwrap().variadic().validate().is_err());
        let f = Function::new("f")
            .unwrap()
            .param(Parameter::new("args").unwrap())
            .unwrap()
            .variadic();
        assert!(f.validate().is_ok());
        assert!(Closure::new().variadic().validate().is_err());
    }

    #[test]
    fn test_promoted_readonly_requires_type() {
        let ctor = Method::new("__construct")
            .unwrap()
            .param(Parameter::new("id").unwrap().readonly())
            .unwrap();
        let err = ctor.validate().unwrap_err();
        assert!(err.to_string().contains("Parameter $id"));
    }

    #[test]
    fn test_interface_rules() {
        let shape = Interface::new("Shape")
            .unwrap()
            .with_method(Method::new("area").unwrap().returns("float"))
            .unwrap();
        assert!(shape.validate().is_ok());

        let with_body = Interface::new("Shape")
            .unwrap()
            .with_method(Method::new("area").unwrap().body("return 1;"))
            .unwrap();
        assert!(with_body.validate().is_err());

        let protected = Interface::new("Shape")
            .unwrap()
            .with_method(Method::new("area").unwrap().protected())
            .unwrap();
        assert!(protected.validate().is_err());

        let plain_property = Interface::new("Named")
            .unwrap()
            .with_property(Property::new("name").unwrap().ty("string"))
            .unwrap();
        assert!(plain_property.validate().is_err());

        let contract = Interface::new("Named")
            .unwrap()
            .with_property(
                Property::new("name")
                    .unwrap()
                    .ty("string")
                    .hook(HookType::Get, PropertyHook::new()),
            )
            .unwrap();
        assert!(contract.validate().is_ok());
    }

    #[test]
    fn test_enum_backing_type() {
        let bad = Enum::new("Suit").unwrap().backing("float");
        assert!(bad.validate().is_err());
        let good = Enum::new("Suit")
            .unwrap()
            .backing("string")
            .with_case(EnumCase::new("Hearts").unwrap().value("H"))
            .unwrap();
        assert!(ClassLike::from(good).validate().is_ok());
    }

    #[test]
    fn test_enum_case_values_follow_backing() {
        let mismatched = Enum::new("Suit")
            .unwrap()
            .backing("int")
            .with_case(EnumCase::new("Hearts").unwrap().value("H"))
            .unwrap();
        let err = mismatched.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Case Suit::Hearts: case value does not match backing type int"
        );

        let missing = Enum::new("Suit")
            .unwrap()
            .with_case(EnumCase::new("Hearts").unwrap().value(1))
            .unwrap()
            .with_case(EnumCase::new("Spades").unwrap())
            .unwrap();
        let err = missing.validate().unwrap_err();
        assert!(message(err).contains("must have a value"));

        let mixed = Enum::new("Suit")
            .unwrap()
            .with_case(EnumCase::new("Hearts").unwrap().value(1))
            .unwrap()
            .with_case(EnumCase::new("Spades").unwrap().value("S"))
            .unwrap();
        assert!(mixed.validate().is_err());

        let float = Enum::new("Suit")
            .unwrap()
            .with_case(EnumCase::new("Hearts").unwrap().value(1.5))
            .unwrap();
        assert!(message(float.validate().unwrap_err()).contains("unbacked"));

        let constant = Enum::new("Suit")
            .unwrap()
            .backing("int")
            .with_case(
                EnumCase::new("Hearts")
                    .unwrap()
                    .value(Literal::new("self::BASE + 1")),
            )
            .unwrap();
        assert!(constant.validate().is_ok());
    }

    #[test]
    fn test_class_reports_member_violation() {
        let class = Class::new("Point")
            .unwrap()
            .with_property(Property::new("x").unwrap().readonly())
            .unwrap();
        let err = class.validate().unwrap_err();
        assert!(err.to_string().starts_with("Property Point::$x"));
    }
}
