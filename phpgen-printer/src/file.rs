//! Files and namespaces.

use phpgen_core::naming::extract_short_name;
use phpgen_core::text::format_doc_comment;
use phpgen_core::{CodeBuilder, Result};
use phpgen_model::{File, NameKind, NameTable, Namespace};
use tracing::debug;

use crate::Printer;

impl Printer {
    /// Print a complete `<?php` file.
    ///
    /// When the global namespace shares the file with named ones, every
    /// namespace switches to the bracketed syntax.
    pub fn print_file(&self, file: &File) -> Result<String> {
        debug!(namespaces = file.namespaces().count(), "printing file");
        let bracketed = file.has_mixed_namespaces();
        let namespaces = file
            .namespaces()
            .filter(|ns| !self.config.omit_empty_namespaces || !ns.is_empty())
            .map(|ns| self.namespace(ns, bracketed || ns.bracketed))
            .collect::<Result<Vec<_>>>()?;

        let mut out = String::from("<?php\n");
        if let Some(doc) = file.doc.as_deref().filter(|doc| !doc.trim().is_empty()) {
            out.push('\n');
            out.push_str(&format_doc_comment(doc, true));
        }
        out.push('\n');
        if file.strict_types {
            out.push_str("declare(strict_types=1);\n\n");
        }
        out.push_str(&namespaces.join("\n"));
        Ok(out)
    }

    /// Print a namespace block: header, `use` imports, then declarations.
    pub fn print_namespace(&self, namespace: &Namespace) -> Result<String> {
        self.namespace(namespace, namespace.bracketed)
    }

    fn namespace(&self, namespace: &Namespace, bracketed: bool) -> Result<String> {
        debug!(namespace = namespace.name(), bracketed, "printing namespace");
        let name = namespace.name();

        let groups: Vec<String> = NameKind::ALL
            .into_iter()
            .map(|kind| self.uses(namespace.names(), kind))
            .filter(|group| !group.is_empty())
            .collect();

        let mut items = Vec::new();
        for class in namespace.classes() {
            items.push(self.print_class(class, Some(namespace))?);
        }
        for function in namespace.functions() {
            items.push(self.print_function(function, Some(namespace))?);
        }

        let mut body = CodeBuilder::new(self.config.indentation);
        for (i, group) in groups.iter().enumerate() {
            if i > 0 {
                body.push_blanks(self.config.lines_between_use_types);
            }
            body.push_raw(group);
        }
        if !groups.is_empty() {
            body.push_blank();
        }
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                body.push_blank();
            }
            body.push_raw(item);
        }
        let body = body.build();

        let builder = CodeBuilder::new(self.config.indentation);
        Ok(if bracketed {
            let header = if name.is_empty() {
                "namespace".to_string()
            } else {
                format!("namespace {name}")
            };
            builder
                .block_with_close(&header, "}", |b: CodeBuilder| b.text(&body))
                .build()
        } else if name.is_empty() {
            body
        } else {
            builder
                .line(&format!("namespace {name};"))
                .blank()
                .raw(&body)
                .build()
        })
    }

    /// One `use` line per alias of `kind`.
    fn uses(&self, names: &NameTable, kind: NameKind) -> String {
        let prefix = kind
            .use_keyword()
            .map(|keyword| format!("{keyword} "))
            .unwrap_or_default();
        names
            .uses(kind)
            .into_iter()
            .map(|(alias, target)| {
                if extract_short_name(target) == alias {
                    format!("use {prefix}{target};\n")
                } else {
                    format!("use {prefix}{target} as {alias};\n")
                }
            })
            .collect()
    }
}
