//! The [`Printer`] and the pieces shared by every production.

use phpgen_core::Result;
use phpgen_core::builder::indent_block;
use phpgen_core::text::{format_doc_comment, normalize_body, width};
use phpgen_dumper::{Dumper, Value};
use phpgen_model::{
    Attribute, Hooks, NameKind, NameTable, Namespace, Parameter, TypeHint, Visibility,
    simplify_tagged_names,
};

use crate::PrinterConfig;

/// Renders model entities as PHP source.
///
/// The configuration is fixed at construction; every `print_*` call only
/// reads it, so one printer can render any number of models.
///
/// # Example
///
/// ```
/// use phpgen_model::{Class, Declaration, FunctionLike, Method};
/// use phpgen_printer::Printer;
///
/// let class = Class::new("Greeter")
///     .unwrap()
///     .with_method(Method::new("hello").unwrap().returns("string").body("return 'hi';"))
///     .unwrap();
///
/// let code = Printer::default().print_class(&class.into(), None).unwrap();
/// assert_eq!(
///     code,
///     "class Greeter\n{\n\tpublic function hello(): string\n\t{\n\t\treturn 'hi';\n\t}\n}\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Printer {
    pub(crate) config: PrinterConfig,
    dumper: Dumper,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrinterConfig::default())
    }
}

impl Printer {
    pub fn new(config: PrinterConfig) -> Self {
        let dumper = config.dumper();
        Self { config, dumper }
    }

    /// A printer with the PSR-12 preset.
    pub fn psr() -> Self {
        Self::new(PrinterConfig::psr())
    }

    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    /// Dump a value as a PHP literal placed at `column`.
    pub fn dump(&self, value: &Value, column: usize) -> Result<String> {
        self.dump_in(value, column, None)
    }

    /// Render a declared type as it would appear inside `namespace`.
    pub fn print_type(&self, ty: &TypeHint, namespace: Option<&Namespace>) -> String {
        self.type_hint(ty, self.scope(namespace))
    }

    /// The alias table names are shortened against, if resolution is on.
    pub(crate) fn scope<'a>(&self, namespace: Option<&'a Namespace>) -> Option<&'a NameTable> {
        namespace
            .filter(|_| self.config.resolve_types)
            .map(Namespace::names)
    }

    pub(crate) fn dump_in(
        &self,
        value: &Value,
        column: usize,
        scope: Option<&NameTable>,
    ) -> Result<String> {
        let code = self.dumper.dump_at(value, column)?;
        Ok(simplify_tagged_names(&code, scope))
    }

    pub(crate) fn indent(&self, code: &str) -> String {
        indent_block(code, self.config.indentation)
    }

    /// Spelling of a class name (or compound type) inside `scope`.
    pub(crate) fn type_name(&self, name: &str, scope: Option<&NameTable>) -> String {
        match scope {
            Some(names) => names.simplify_type(name, NameKind::Type),
            None => name.to_string(),
        }
    }

    pub(crate) fn type_hint(&self, ty: &TypeHint, scope: Option<&NameTable>) -> String {
        let Some(name) = ty.name() else {
            return String::new();
        };
        let name = self.type_name(name, scope);
        let has_null = name.split('|').any(|member| member.trim().eq_ignore_ascii_case("null"));
        if !ty.nullable || ty.is("mixed") || has_null {
            name
        } else if name.contains('|') {
            format!("{name}|null")
        } else if name.contains('&') {
            format!("({name})|null")
        } else {
            format!("?{name}")
        }
    }

    /// Statement body: tags resolved, newlines normalised, one trailing
    /// newline.
    pub(crate) fn body(&self, code: &str, scope: Option<&NameTable>) -> String {
        normalize_body(&simplify_tagged_names(code, scope))
    }

    /// `{` block holding `code`, closed by `}` and a newline.
    pub(crate) fn block(&self, code: &str, scope: Option<&NameTable>) -> String {
        format!("{{\n{}}}\n", self.indent(&self.body(code, scope)))
    }

    /// `#[A(...)]` lines, or `#[A, B] ` when `inline` and no argument list
    /// spans several lines.
    pub(crate) fn attributes(
        &self,
        attrs: &[Attribute],
        inline: bool,
        scope: Option<&NameTable>,
    ) -> Result<String> {
        if attrs.is_empty() {
            return Ok(String::new());
        }
        let mut inline = inline;
        let mut items = Vec::with_capacity(attrs.len());
        for attr in attrs {
            let args = self
                .dumper
                .format("...?:", &[Value::Array(attr.args.clone())])?;
            let args = simplify_tagged_names(&args, scope);
            inline &= !args.contains('\n');
            let name = self.type_name(attr.name(), scope);
            items.push(if args.is_empty() {
                name
            } else {
                format!("{name}({args})")
            });
        }
        Ok(if inline {
            format!("#[{}] ", items.join(", "))
        } else {
            format!("#[{}]\n", items.join("]\n#["))
        })
    }

    /// Hook list following a property or promoted parameter, empty without
    /// hooks.
    pub(crate) fn hooks(
        &self,
        hooks: &Hooks,
        in_interface: bool,
        scope: Option<&NameTable>,
    ) -> Result<String> {
        if hooks.is_empty() {
            return Ok(String::new());
        }
        let mut simple = true;
        let mut printed = Vec::new();
        for (ty, hook) in hooks.iter() {
            let declared_only = hook.is_abstract || in_interface;
            simple &= declared_only;

            let mut out = doc_comment(hook.doc.as_deref(), false);
            out.push_str(&self.attributes(&hook.attributes, false, scope)?);
            if !declared_only && hook.is_final {
                out.push_str("final ");
            }
            if hook.returns_ref {
                out.push('&');
            }
            out.push_str(ty.as_str());
            if declared_only {
                out.push(';');
            } else {
                if !hook.parameters.is_empty() {
                    out.push_str(&self.parameter_list(hook.parameters.iter(), false, 0, scope)?);
                }
                if hook.short {
                    let expr = simplify_tagged_names(hook.body.trim(), scope);
                    out.push_str(&format!(" => {expr};"));
                } else {
                    out.push(' ');
                    out.push_str(self.block(&hook.body, scope).trim_end_matches('\n'));
                }
            }
            printed.push(out);
        }

        Ok(if simple {
            format!(" {{ {} }}", printed.join(" "))
        } else {
            format!(" {{\n{}\n}}", self.indent(&printed.join("\n")))
        })
    }

    /// `(...)` parameter list, on one line when it fits after `column`
    /// characters and no parameter needs lines of its own.
    pub(crate) fn parameter_list<'a>(
        &self,
        params: impl Iterator<Item = &'a Parameter> + Clone,
        variadic: bool,
        column: usize,
        scope: Option<&NameTable>,
    ) -> Result<String> {
        let mut count = 0;
        let mut special = false;
        for param in params.clone() {
            count += 1;
            special |= param.is_promoted() || !param.attributes.is_empty() || param.doc.is_some();
        }

        if !special || (self.config.single_parameter_on_one_line && count == 1) {
            let line = self.format_parameters(params.clone(), count, variadic, false, scope)?;
            if !line.contains('\n') && width(&line) + column <= self.config.wrap_length {
                return Ok(line);
            }
        }
        self.format_parameters(params, count, variadic, true, scope)
    }

    fn format_parameters<'a>(
        &self,
        params: impl Iterator<Item = &'a Parameter>,
        count: usize,
        variadic: bool,
        multiline: bool,
        scope: Option<&NameTable>,
    ) -> Result<String> {
        let mut items = Vec::with_capacity(count);
        for (index, param) in params.enumerate() {
            let spread = variadic && index + 1 == count;
            items.push(self.parameter(param, spread, multiline, scope)?);
        }

        Ok(if multiline {
            let body: String = items.iter().map(|item| format!("{item},\n")).collect();
            format!("(\n{})", self.indent(&body))
        } else {
            format!("({})", items.join(", "))
        })
    }

    fn parameter(
        &self,
        param: &Parameter,
        spread: bool,
        multiline: bool,
        scope: Option<&NameTable>,
    ) -> Result<String> {
        let mut out = doc_comment(param.doc.as_deref(), false);
        let attrs = self.attributes(&param.attributes, true, scope)?;
        if multiline && attrs.ends_with(' ') {
            out.push_str(attrs.trim_end_matches(' '));
            out.push('\n');
        } else {
            out.push_str(&attrs);
        }

        if let Some(promotion) = &param.promotion {
            if promotion.is_final {
                out.push_str("final ");
            }
            out.push_str(&property_visibility(
                Some(promotion.visibility),
                promotion.set_visibility,
            ));
            if promotion.is_readonly && param.ty.is_set() {
                out.push_str(" readonly");
            }
            out.push(' ');
        }

        let ty = self.type_hint(&param.ty, scope);
        if !ty.is_empty() {
            out.push_str(&ty);
            out.push(' ');
        }
        if param.by_ref {
            out.push('&');
        }
        if spread {
            out.push_str("...");
        }
        out.push('$');
        out.push_str(param.name());

        if let Some(default) = param.default.as_ref().filter(|_| !spread) {
            out.push_str(" = ");
            out.push_str(&self.dump_in(default, 0, scope)?);
        }
        if let Some(promotion) = &param.promotion {
            out.push_str(&self.hooks(&promotion.hooks, false, scope)?);
        }
        Ok(out)
    }
}

/// `public`, `private(set)`, or `public private(set)`.
pub(crate) fn property_visibility(get: Option<Visibility>, set: Option<Visibility>) -> String {
    match (get, set) {
        (Some(get), Some(set)) => format!("{get} {set}(set)"),
        (None, Some(set)) => format!("{set}(set)"),
        (Some(get), None) => get.to_string(),
        (None, None) => Visibility::Public.to_string(),
    }
}

pub(crate) fn doc_comment(doc: Option<&str>, multiline: bool) -> String {
    doc.map(|d| format_doc_comment(d, multiline))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use phpgen_dumper::Array;
    use phpgen_model::{HookType, PropertyHook};

    use super::*;

    fn names(namespace: &str) -> NameTable {
        NameTable::new(namespace).unwrap()
    }

    #[test]
    fn test_type_hint_nullable_forms() {
        let printer = Printer::default();
        assert_eq!(printer.type_hint(&TypeHint::parse("?int"), None), "?int");
        assert_eq!(printer.type_hint(&TypeHint::parse("?int|string"), None), "int|string|null");
        assert_eq!(printer.type_hint(&TypeHint::parse("?A&B"), None), "(A&B)|null");
        assert_eq!(printer.type_hint(&TypeHint::parse("?mixed"), None), "mixed");
        assert_eq!(printer.type_hint(&TypeHint::default(), None), "");
    }

    #[test]
    fn test_type_hint_null_member_not_repeated() {
        let printer = Printer::default();
        assert_eq!(printer.type_hint(&TypeHint::parse("?int|null"), None), "int|null");
        assert_eq!(printer.type_hint(&TypeHint::parse("?NULL|string"), None), "NULL|string");
        assert_eq!(printer.type_hint(&TypeHint::parse("?null"), None), "null");
        assert_eq!(printer.type_hint(&TypeHint::parse("?(A&B)|null"), None), "(A&B)|null");
    }

    #[test]
    fn test_type_hint_resolved_in_scope() {
        let printer = Printer::default();
        let scope = names("App");
        let ty = TypeHint::parse("?App\\Model\\User");
        assert_eq!(printer.type_hint(&ty, Some(&scope)), "?Model\\User");
        assert_eq!(printer.type_hint(&ty, None), "?App\\Model\\User");
    }

    #[test]
    fn test_print_type_respects_resolve_flag() {
        let namespace = Namespace::new("App").unwrap();
        let ty = TypeHint::parse("App\\User");
        assert_eq!(Printer::default().print_type(&ty, Some(&namespace)), "User");

        let config = PrinterConfig {
            resolve_types: false,
            ..PrinterConfig::default()
        };
        assert_eq!(Printer::new(config).print_type(&ty, Some(&namespace)), "App\\User");
    }

    #[test]
    fn test_attributes_block_and_inline() {
        let printer = Printer::default();
        let attrs = vec![
            Attribute::new("Deprecated").unwrap(),
            Attribute::new("Route").unwrap().arg("/home").named("methods", Array::list(["GET"])),
        ];
        assert_eq!(
            printer.attributes(&attrs, false, None).unwrap(),
            "#[Deprecated]\n#[Route('/home', methods: ['GET'])]\n"
        );
        assert_eq!(
            printer.attributes(&attrs, true, None).unwrap(),
            "#[Deprecated, Route('/home', methods: ['GET'])] "
        );
    }

    #[test]
    fn test_attribute_name_resolved() {
        let printer = Printer::default();
        let mut scope = names("App");
        scope.register("Doctrine\\ORM\\Mapping\\Entity", None, NameKind::Type).unwrap();
        let attrs = vec![Attribute::new("Doctrine\\ORM\\Mapping\\Entity").unwrap()];
        assert_eq!(printer.attributes(&attrs, false, Some(&scope)).unwrap(), "#[Entity]\n");
    }

    #[test]
    fn test_body_resolves_tags_and_normalises() {
        let printer = Printer::default();
        let scope = names("App");
        let code = "\n\nreturn new /*(n*/App\\User();   \r\n\n";
        assert_eq!(printer.body(code, Some(&scope)), "return new User();\n");
        assert_eq!(printer.body("  \n", None), "");
    }

    #[test]
    fn test_parameter_list_inline_and_wrapped() {
        let printer = Printer::default();
        let params = [
            Parameter::new("a").unwrap().ty("int"),
            Parameter::new("b").unwrap().ty("?string").default(Value::Null),
        ];
        assert_eq!(
            printer.parameter_list(params.iter(), false, 0, None).unwrap(),
            "(int $a, ?string $b = null)"
        );
        assert_eq!(
            printer.parameter_list(params.iter(), false, 110, None).unwrap(),
            "(\n\tint $a,\n\t?string $b = null,\n)"
        );
    }

    #[test]
    fn test_variadic_parameter_drops_default() {
        let printer = Printer::default();
        let params = [Parameter::new("items").unwrap().ty("int").default(Value::Int(0))];
        assert_eq!(
            printer.parameter_list(params.iter(), true, 0, None).unwrap(),
            "(int ...$items)"
        );
    }

    #[test]
    fn test_promoted_parameter_forces_multiline() {
        let printer = Printer::default();
        let params = [Parameter::new("id")
            .unwrap()
            .ty("int")
            .promote(Visibility::Private)
            .readonly()];
        assert_eq!(
            printer.parameter_list(params.iter(), false, 0, None).unwrap(),
            "(\n\tprivate readonly int $id,\n)"
        );

        let config = PrinterConfig {
            single_parameter_on_one_line: true,
            ..PrinterConfig::default()
        };
        assert_eq!(
            Printer::new(config).parameter_list(params.iter(), false, 0, None).unwrap(),
            "(private readonly int $id)"
        );
    }

    #[test]
    fn test_parameter_attributes_on_own_line_when_wrapped() {
        let printer = Printer::default();
        let params = [Parameter::new("name")
            .unwrap()
            .ty("string")
            .attribute(Attribute::new("SensitiveParameter").unwrap())];
        assert_eq!(
            printer.parameter_list(params.iter(), false, 0, None).unwrap(),
            "(\n\t#[SensitiveParameter]\n\tstring $name,\n)"
        );
    }

    #[test]
    fn test_abstract_hooks_are_simple() {
        let printer = Printer::default();
        let mut hooks = Hooks::default();
        hooks.add(HookType::Get, PropertyHook::new().abstract_());
        hooks.add(HookType::Set, PropertyHook::new().abstract_());
        assert_eq!(printer.hooks(&hooks, false, None).unwrap(), " { get; set; }");
    }

    #[test]
    fn test_hooks_in_interface_drop_bodies() {
        let printer = Printer::default();
        let mut hooks = Hooks::default();
        hooks.add(HookType::Get, PropertyHook::new().short("$this->x").returns_ref());
        assert_eq!(printer.hooks(&hooks, true, None).unwrap(), " { &get; }");
    }

    #[test]
    fn test_hook_bodies() {
        let printer = Printer::default();
        let mut hooks = Hooks::default();
        hooks.add(HookType::Get, PropertyHook::new().short("strtoupper($this->name)"));
        hooks.add(
            HookType::Set,
            PropertyHook::new()
                .body("$this->name = $value;")
                .param(Parameter::new("value").unwrap().ty("string"))
                .unwrap(),
        );
        assert_eq!(
            printer.hooks(&hooks, false, None).unwrap(),
            " {\n\tget => strtoupper($this->name);\n\tset(string $value) {\n\t\t$this->name = $value;\n\t}\n}"
        );
    }

    #[test]
    fn test_property_visibility() {
        use Visibility::*;
        assert_eq!(property_visibility(None, None), "public");
        assert_eq!(property_visibility(Some(Protected), None), "protected");
        assert_eq!(property_visibility(None, Some(Private)), "private(set)");
        assert_eq!(property_visibility(Some(Public), Some(Private)), "public private(set)");
    }

    #[test]
    fn test_doc_comment() {
        assert_eq!(doc_comment(None, true), "");
        assert_eq!(doc_comment(Some("Id"), false), "/** Id */\n");
        assert_eq!(doc_comment(Some("Id"), true), "/**\n * Id\n */\n");
    }
}
