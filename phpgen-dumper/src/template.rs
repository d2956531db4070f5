//! Placeholder templates: `func(?, ...?)` with values dumped into the holes.

use phpgen_core::naming::is_identifier;
use phpgen_core::text::last_line_width;
use phpgen_core::{Error, Result};

use crate::{Dumper, Value};

/// Placeholder tokens, longest first so prefixes never shadow them.
const TOKENS: [&str; 7] = ["...?:", "...?", "$?", "->?", "::?", "\\?", "?*"];

impl Dumper {
    /// Render `template`, replacing placeholders with dumped arguments.
    ///
    /// | token | meaning |
    /// |-------|---------|
    /// | `?` | one value |
    /// | `...?` / `?*` | array argument spread as a call argument list |
    /// | `...?:` | same, string keys become named arguments |
    /// | `$?` `->?` `::?` | variable or member name, braced when not an identifier |
    /// | `\?` | a literal `?` |
    ///
    /// A `?` directly followed by a word character or `:` is left alone.
    ///
    /// # Example
    ///
    /// ```
    /// use phpgen_dumper::{Array, Dumper, Value};
    ///
    /// let dumper = Dumper::new();
    /// let out = dumper
    ///     .format("$obj->?(...?)", &[Value::from("run"), Array::list([1, 2]).into()])
    ///     .unwrap();
    /// assert_eq!(out, "$obj->run(1, 2)");
    /// ```
    pub fn format(&self, template: &str, args: &[Value]) -> Result<String> {
        let mut args = args.iter();
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(pos) = rest.find(['.', '$', '-', ':', '\\', '?']) {
            out.push_str(&rest[..pos]);
            rest = &rest[pos..];

            let token = TOKENS
                .iter()
                .copied()
                .find(|t| rest.starts_with(t))
                .or_else(|| (rest.starts_with('?') && !keeps_question_mark(&rest[1..])).then_some("?"));

            let Some(token) = token else {
                let ch = rest.chars().next().map_or(1, char::len_utf8);
                out.push_str(&rest[..ch]);
                rest = &rest[ch..];
                continue;
            };
            rest = &rest[token.len()..];

            if token == "\\?" {
                out.push('?');
                continue;
            }

            let arg = args
                .next()
                .ok_or_else(|| Error::template("Insufficient number of arguments."))?;
            let column = last_line_width(&out);

            match token {
                "?" => out.push_str(&self.dump_at(arg, column)?),
                "...?" | "...?:" | "?*" => {
                    let Value::Array(items) = arg else {
                        return Err(Error::template(format!(
                            "Argument for '{token}' must be an array, {} given.",
                            arg.type_name()
                        )));
                    };
                    out.push_str(&self.dump_arguments(items, column, token == "...?:")?);
                }
                member => {
                    out.push_str(&member[..member.len() - 1]);
                    match arg.as_str() {
                        Some(name) if is_identifier(name) => out.push_str(name),
                        _ => {
                            out.push('{');
                            out.push_str(&self.dump(arg)?);
                            out.push('}');
                        }
                    }
                }
            }
        }
        out.push_str(rest);

        if args.next().is_some() {
            return Err(Error::template("Insufficient number of placeholders."));
        }
        Ok(out)
    }
}

/// A `?` before a word character or `:` (`?Foo`, `?:`) is plain code.
fn keeps_question_mark(rest: &str) -> bool {
    rest.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':' || !c.is_ascii())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Array, Literal};

    fn format(template: &str, args: &[Value]) -> Result<String> {
        Dumper::new().format(template, args)
    }

    #[test]
    fn test_simple_placeholders() {
        let out = format("strlen(?) + ?", &["abc".into(), 1.into()]).unwrap();
        assert_eq!(out, "strlen('abc') + 1");
    }

    #[test]
    fn test_question_mark_before_word_is_kept() {
        assert_eq!(format("?Foo $a ?", &[1.into()]).unwrap(), "?Foo $a 1");
        let err = format("$a ?? 1", &[]).unwrap_err();
        assert!(matches!(*err, Error::Template { .. }));
    }

    #[test]
    fn test_short_ternary_is_kept() {
        assert_eq!(format("$a ?: ?", &[1.into()]).unwrap(), "$a ?: 1");
        assert_eq!(format("return $x?:?;", &["y".into()]).unwrap(), "return $x?:'y';");
    }

    #[test]
    fn test_escaped_question_mark() {
        assert_eq!(format("$a \\? ?", &[1.into()]).unwrap(), "$a ? 1");
    }

    #[test]
    fn test_member_tokens() {
        assert_eq!(format("$?", &["name".into()]).unwrap(), "$name");
        assert_eq!(format("$obj->?", &["a b".into()]).unwrap(), "$obj->{'a b'}");
        assert_eq!(format("A::?", &["B".into()]).unwrap(), "A::B");
        assert_eq!(
            format("$obj->?()", &[Literal::new("$method").into()]).unwrap(),
            "$obj->{$method}()"
        );
    }

    #[test]
    fn test_spread() {
        let args = Array::list([1, 2, 3]);
        assert_eq!(format("f(...?)", &[args.clone().into()]).unwrap(), "f(1, 2, 3)");
        assert_eq!(format("f(?*)", &[args.into()]).unwrap(), "f(1, 2, 3)");
    }

    #[test]
    fn test_named_spread() {
        let args = Array::new().with(1).with_entry("mode", "r");
        assert_eq!(format("f(...?:)", &[args.clone().into()]).unwrap(), "f(1, mode: 'r')");
        assert_eq!(format("f(...?)", &[args.into()]).unwrap(), "f(1, 'r')");
    }

    #[test]
    fn test_spread_wraps_long_argument_lists() {
        let dumper = Dumper {
            wrap_length: 10,
            ..Dumper::new()
        };
        let args = Array::list(["alpha", "beta"]);
        assert_eq!(
            dumper.format("call(...?)", &[args.into()]).unwrap(),
            "call(\n\t'alpha',\n\t'beta',\n)"
        );
    }

    #[test]
    fn test_single_spread_argument_never_wraps() {
        let dumper = Dumper {
            wrap_length: 5,
            ..Dumper::new()
        };
        let args = Array::list(["a long string"]);
        assert_eq!(
            dumper.format("f(...?)", &[args.into()]).unwrap(),
            "f('a long string')"
        );
    }

    #[test]
    fn test_spread_requires_array() {
        let err = format("f(...?)", &[1.into()]).unwrap_err();
        assert!(err.to_string().contains("must be an array"));
    }

    #[test]
    fn test_argument_count_mismatch() {
        let err = format("f(?, ?)", &[1.into()]).unwrap_err();
        assert!(err.to_string().contains("Insufficient number of arguments"));

        let err = format("f(?)", &[1.into(), 2.into()]).unwrap_err();
        assert!(err.to_string().contains("Insufficient number of placeholders"));
    }

    #[test]
    fn test_non_placeholder_punctuation_is_copied() {
        assert_eq!(
            format("$a->b::c ... \\Foo::X - ?", &[Value::Null]).unwrap(),
            "$a->b::c ... \\Foo::X - null"
        );
    }
}
