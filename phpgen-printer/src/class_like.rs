//! Class-like declarations and their members.

use phpgen_core::text::width;
use phpgen_core::{CodeBuilder, Result};
use phpgen_model::{
    ClassLike, Constant, Enum, MemberMap, Method, NameTable, Namespace, Property, TraitUse,
    Validate, simplify_tagged_names,
};
use tracing::debug;

use crate::Printer;
use crate::printer::{doc_comment, property_visibility};

impl Printer {
    /// Print a class, interface, trait, or enum.
    ///
    /// Names are shortened against `namespace` when given and type
    /// resolution is enabled.
    pub fn print_class(&self, class: &ClassLike, namespace: Option<&Namespace>) -> Result<String> {
        debug!(class = class.name(), kind = class.keyword(), "printing class-like");
        class.validate()?;
        let scope = self.scope(namespace);
        let decl = class.decl();
        let is_interface = class.is_interface();
        let readonly_class = class.as_class().is_some_and(|c| c.is_readonly);

        let traits = match class.traits() {
            Some(traits) => self.trait_uses(traits, scope),
            None => String::new(),
        };
        let constants = decl
            .constants
            .iter()
            .map(|constant| self.constant(constant, scope))
            .collect::<Result<Vec<_>>>()?;
        let cases = match class {
            ClassLike::Enum(en) => self.enum_cases(en, scope)?,
            _ => Vec::new(),
        };
        let properties = class
            .properties()
            .into_iter()
            .flatten()
            .map(|property| self.property(property, readonly_class, is_interface, scope))
            .collect::<Result<Vec<_>>>()?;
        let methods = decl
            .methods
            .iter()
            .map(|method| {
                if readonly_class && method.is_constructor() {
                    self.method(&without_readonly_promotions(method), scope, is_interface)
                } else {
                    self.method(method, scope, is_interface)
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let mut methods_text = CodeBuilder::new(self.config.indentation);
        if !methods.is_empty() && !properties.is_empty() {
            methods_text.push_blanks(self.config.lines_between_methods.saturating_sub(1));
        }
        for (i, method) in methods.iter().enumerate() {
            if i > 0 {
                methods_text.push_blanks(self.config.lines_between_methods);
            }
            methods_text.push_raw(method);
        }

        let sections: Vec<String> = [
            traits,
            self.join_members(&constants),
            self.join_members(&cases),
            self.join_members(&properties),
            methods_text.build(),
        ]
        .into_iter()
        .filter(|section| !section.is_empty())
        .collect();

        Ok(CodeBuilder::new(self.config.indentation)
            .raw(&doc_comment(decl.doc.as_deref(), true))
            .raw(&self.attributes(&decl.attributes, false, scope)?)
            .block_with_close(&self.class_header(class, scope), "}", |b: CodeBuilder| {
                b.each(sections.iter().enumerate(), |b, (i, section)| {
                    b.when(i > 0, CodeBuilder::blank).text(section)
                })
            })
            .build())
    }

    /// `abstract final readonly class Name extends Parent implements A, B`
    fn class_header(&self, class: &ClassLike, scope: Option<&NameTable>) -> String {
        let names = |list: &[String]| {
            list.iter()
                .map(|name| self.type_name(name, scope))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut parts: Vec<String> = Vec::new();
        match class {
            ClassLike::Class(c) => {
                if c.is_abstract {
                    parts.push("abstract".into());
                }
                if c.is_final {
                    parts.push("final".into());
                }
                if c.is_readonly {
                    parts.push("readonly".into());
                }
                parts.push(format!("class {}", class.name()));
                if let Some(parent) = &c.extends {
                    parts.push(format!("extends {}", self.type_name(parent, scope)));
                }
                if !c.implements.is_empty() {
                    parts.push(format!("implements {}", names(&c.implements)));
                }
            }
            ClassLike::Interface(i) => {
                parts.push(format!("interface {}", class.name()));
                if !i.extends.is_empty() {
                    parts.push(format!("extends {}", names(&i.extends)));
                }
            }
            ClassLike::Trait(_) => parts.push(format!("trait {}", class.name())),
            ClassLike::Enum(en) => {
                let backing = en
                    .backing_type()
                    .map(|ty| format!("{}{ty}", self.config.return_type_colon))
                    .unwrap_or_default();
                parts.push(format!("enum {}{backing}", class.name()));
                if !en.implements.is_empty() {
                    parts.push(format!("implements {}", names(&en.implements)));
                }
            }
        }
        parts.join(" ")
    }

    fn trait_uses(&self, traits: &MemberMap<TraitUse>, scope: Option<&NameTable>) -> String {
        traits
            .iter()
            .map(|tr| {
                let name = self.type_name(tr.name(), scope);
                let mut out = doc_comment(tr.doc.as_deref(), false);
                if tr.resolutions.is_empty() {
                    out.push_str(&format!("use {name};\n"));
                } else {
                    let clauses = simplify_tagged_names(&tr.resolutions.join(";\n"), scope);
                    out.push_str(&format!("use {name} {{\n{};\n}}\n", self.indent(&clauses)));
                }
                out
            })
            .collect()
    }

    fn constant(&self, constant: &Constant, scope: Option<&NameTable>) -> Result<String> {
        let mut def = String::new();
        if constant.is_final {
            def.push_str("final ");
        }
        if let Some(vis) = constant.visibility {
            def.push_str(vis.as_str());
            def.push(' ');
        }
        def.push_str("const ");
        let ty = self.type_hint(&constant.ty, scope);
        if !ty.is_empty() {
            def.push_str(&ty);
            def.push(' ');
        }
        def.push_str(constant.name());
        def.push_str(" = ");

        let mut out = doc_comment(constant.doc.as_deref(), false);
        out.push_str(&self.attributes(&constant.attributes, false, scope)?);
        out.push_str(&def);
        out.push_str(&self.dump_in(&constant.value, width(&def), scope)?);
        out.push_str(";\n");
        Ok(out)
    }

    fn enum_cases(&self, en: &Enum, scope: Option<&NameTable>) -> Result<Vec<String>> {
        en.cases
            .iter()
            .map(|case| {
                let mut out = doc_comment(case.doc.as_deref(), false);
                out.push_str(&self.attributes(&case.attributes, false, scope)?);
                out.push_str("case ");
                out.push_str(case.name());
                if let Some(value) = &case.value {
                    out.push_str(" = ");
                    out.push_str(&self.dump_in(value, 0, scope)?);
                }
                out.push_str(";\n");
                Ok(out)
            })
            .collect()
    }

    fn property(
        &self,
        property: &Property,
        readonly_class: bool,
        in_interface: bool,
        scope: Option<&NameTable>,
    ) -> Result<String> {
        let mut def = String::new();
        if property.is_abstract && !in_interface {
            def.push_str("abstract ");
        }
        if property.is_final {
            def.push_str("final ");
        }
        def.push_str(&property_visibility(property.visibility, property.set_visibility));
        if property.is_static {
            def.push_str(" static");
        }
        if !readonly_class && property.is_readonly && property.ty.is_set() {
            def.push_str(" readonly");
        }
        def.push(' ');
        let ty = self.type_hint(&property.ty, scope);
        if !ty.is_empty() {
            def.push_str(&ty);
            def.push(' ');
        }
        def.push('$');
        def.push_str(property.name());

        let mut out = doc_comment(property.doc.as_deref(), false);
        out.push_str(&self.attributes(&property.attributes, false, scope)?);
        out.push_str(&def);
        if let Some(value) = &property.value {
            out.push_str(" = ");
            out.push_str(&self.dump_in(value, width(&def) + 3, scope)?);
        }
        let hooks = self.hooks(&property.hooks, in_interface, scope)?;
        if hooks.is_empty() {
            out.push(';');
        } else {
            out.push_str(&hooks);
        }
        out.push('\n');
        Ok(out)
    }

    /// Join constants, cases, or properties. Without configured spacing an
    /// entry opening with a doc comment or attribute still gets a blank line
    /// before it.
    fn join_members(&self, items: &[String]) -> String {
        let spacing = self.config.lines_between_properties;
        if spacing > 0 {
            return items.join(&"\n".repeat(spacing));
        }
        let mut out = String::new();
        for (index, item) in items.iter().enumerate() {
            if index > 0 && (item.starts_with("/**") || item.starts_with("#[")) {
                out.push('\n');
            }
            out.push_str(item);
        }
        out
    }
}

/// Copy of a constructor whose promoted parameters drop `readonly`, for
/// printing inside a readonly class.
fn without_readonly_promotions(method: &Method) -> Method {
    let mut method = method.clone();
    for param in method.signature.parameters.iter_mut() {
        if let Some(promotion) = &mut param.promotion {
            promotion.is_readonly = false;
        }
    }
    method
}
