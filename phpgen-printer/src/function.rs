//! Functions, methods, closures, and arrow functions.

use phpgen_core::text::width;
use phpgen_core::{Error, Result};
use phpgen_model::{
    Closure, Function, FunctionLike, Method, NameTable, Namespace, Signature, Validate,
};
use tracing::debug;

use crate::Printer;
use crate::printer::doc_comment;

impl Printer {
    /// Print a namespace-level function.
    pub fn print_function(&self, function: &Function, namespace: Option<&Namespace>) -> Result<String> {
        debug!(function = function.name(), "printing function");
        function.validate()?;
        let scope = self.scope(namespace);
        let signature = function.signature();

        let head = format!("function {}{}", ref_marker(signature), function.name());
        let return_type = self.return_type(signature, scope);
        let params = self.signature_parameters(signature, width(&head) + width(&return_type), scope)?;

        let mut out = doc_comment(function.doc.as_deref(), true);
        out.push_str(&self.attributes(&function.attributes, false, scope)?);
        out.push_str(&head);
        out.push_str(&params);
        out.push_str(&return_type);
        out.push_str(self.brace_separator(&params, &return_type));
        out.push_str(&self.block(&function.body, scope));
        Ok(out)
    }

    /// Print a method as it appears inside a class body, without the class
    /// indentation.
    pub fn print_method(
        &self,
        method: &Method,
        namespace: Option<&Namespace>,
        in_interface: bool,
    ) -> Result<String> {
        method.validate()?;
        self.method(method, self.scope(namespace), in_interface)
    }

    pub(crate) fn method(
        &self,
        method: &Method,
        scope: Option<&NameTable>,
        in_interface: bool,
    ) -> Result<String> {
        let signature = method.signature();
        let mut head = String::new();
        if method.is_abstract && !in_interface {
            head.push_str("abstract ");
        }
        if method.is_final {
            head.push_str("final ");
        }
        if let Some(vis) = method.visibility {
            head.push_str(vis.as_str());
            head.push(' ');
        }
        if method.is_static {
            head.push_str("static ");
        }
        head.push_str("function ");
        head.push_str(ref_marker(signature));
        head.push_str(method.name());

        let return_type = self.return_type(signature, scope);
        let column = self.config.indentation.width() + width(&head) + width(&return_type);
        let params = self.signature_parameters(signature, column, scope)?;

        let mut out = doc_comment(method.doc.as_deref(), true);
        out.push_str(&self.attributes(&method.attributes, false, scope)?);
        out.push_str(&head);
        out.push_str(&params);
        out.push_str(&return_type);
        match method.body.as_deref() {
            Some(body) if !method.is_abstract && !in_interface => {
                out.push_str(self.brace_separator(&params, &return_type));
                out.push_str(&self.block(body, scope));
            }
            _ => out.push_str(";\n"),
        }
        Ok(out)
    }

    /// Print a closure expression; the result has no trailing newline.
    pub fn print_closure(&self, closure: &Closure, namespace: Option<&Namespace>) -> Result<String> {
        closure.validate()?;
        let scope = self.scope(namespace);
        let signature = closure.signature();

        let uses: Vec<String> = closure
            .uses
            .iter()
            .map(|binding| format!("{}${}", if binding.by_ref { "&" } else { "" }, binding.name()))
            .collect();
        let joined = uses.join(", ");
        let use_list = if width(&joined) > self.config.wrap_length && uses.len() > 1 {
            let indent = self.config.indentation.as_str();
            format!("\n{indent}{},\n", uses.join(&format!(",\n{indent}")))
        } else {
            joined
        };

        let mut out = self.attributes(&closure.attributes, true, scope)?;
        if closure.is_static {
            out.push_str("static ");
        }
        out.push_str("function ");
        out.push_str(ref_marker(signature));
        out.push_str(&self.signature_parameters(signature, width(&out), scope)?);
        if !uses.is_empty() {
            out.push_str(&format!(" use ({use_list})"));
        }
        out.push_str(&self.return_type(signature, scope));
        out.push(' ');
        out.push_str(self.block(&closure.body, scope).trim_end_matches('\n'));
        Ok(out)
    }

    /// Print a closure as `fn(...) => expr`; the body is the expression.
    ///
    /// Arrow functions capture by value only, so by-reference bindings are
    /// rejected.
    pub fn print_arrow_function(
        &self,
        closure: &Closure,
        namespace: Option<&Namespace>,
    ) -> Result<String> {
        if let Some(binding) = closure.uses.iter().find(|binding| binding.by_ref) {
            return Err(Error::invariant(
                format!("Arrow function binding ${}", binding.name()),
                "arrow function cannot bind variables by-reference",
            ));
        }
        closure.validate()?;
        let scope = self.scope(namespace);
        let signature = closure.signature();

        let mut out = self.attributes(&closure.attributes, true, scope)?;
        if closure.is_static {
            out.push_str("static ");
        }
        out.push_str("fn");
        out.push_str(ref_marker(signature));
        out.push_str(&self.signature_parameters(signature, width(&out), scope)?);
        out.push_str(&self.return_type(signature, scope));
        out.push_str(" => ");
        out.push_str(self.body(&closure.body, scope).trim());
        out.push(';');
        Ok(out)
    }

    fn signature_parameters(
        &self,
        signature: &Signature,
        column: usize,
        scope: Option<&NameTable>,
    ) -> Result<String> {
        self.parameter_list(signature.parameters.iter(), signature.variadic, column, scope)
    }

    fn return_type(&self, signature: &Signature, scope: Option<&NameTable>) -> String {
        let ty = self.type_hint(&signature.return_type, scope);
        if ty.is_empty() {
            ty
        } else {
            format!("{}{ty}", self.config.return_type_colon)
        }
    }

    /// Text between the signature and `{`.
    fn brace_separator(&self, params: &str, return_type: &str) -> &'static str {
        let wrapped = params.contains('\n');
        if self.config.braces_on_next_line && (!wrapped || !return_type.is_empty()) {
            "\n"
        } else {
            " "
        }
    }
}

fn ref_marker(signature: &Signature) -> &'static str {
    if signature.returns_ref { "&" } else { "" }
}
