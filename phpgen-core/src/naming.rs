//! Identifier grammar, reserved words, and qualified-name helpers.

use crate::{Error, Result};

/// Namespace separator of the host language.
pub const SEPARATOR: char = '\\';

/// Reserved words that cannot name a class-like, alias, or be used bare as a
/// type keyword. Compared case-insensitively.
pub const KEYWORDS: &[&str] = &[
    // Type keywords
    "bool", "false", "float", "int", "iterable", "mixed", "never", "null", "object", "parent",
    "self", "static", "string", "true", "void",
    // Language keywords
    "__halt_compiler", "abstract", "and", "array", "as", "break", "callable", "case", "catch",
    "class", "clone", "const", "continue", "declare", "default", "die", "do", "echo", "else",
    "elseif", "empty", "enddeclare", "endfor", "endforeach", "endif", "endswitch", "endwhile",
    "eval", "exit", "extends", "final", "finally", "fn", "for", "foreach", "function",
    "global", "goto", "if", "implements", "include", "include_once", "instanceof", "insteadof",
    "interface", "isset", "list", "match", "namespace", "new", "or", "print", "private",
    "protected", "public", "readonly", "require", "require_once", "return", "switch", "throw",
    "trait", "try", "unset", "use", "var", "while", "xor", "yield",
    // Magic constants
    "__class__", "__dir__", "__file__", "__function__", "__line__", "__method__",
    "__namespace__", "__trait__",
    // Reserved for future use
    "resource", "numeric",
];

/// Check if a name is a reserved word (case-insensitive).
pub fn is_keyword(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    KEYWORDS.contains(&lower.as_str())
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c as u32 >= 0x7f
}

fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

/// Check if a string is a bare identifier (`[a-zA-Z_\x7f-\xff][a-zA-Z0-9_\x7f-\xff]*`).
pub fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => chars.all(is_ident_char),
        _ => false,
    }
}

/// Check if a string is a separator-joined sequence of identifiers.
pub fn is_namespace_identifier(value: &str, allow_leading_separator: bool) -> bool {
    let value = match value.strip_prefix(SEPARATOR) {
        Some(rest) if allow_leading_separator => rest,
        Some(_) => return false,
        None => value,
    };
    value.split(SEPARATOR).all(is_identifier)
}

/// Validate that a name is a valid identifier.
/// Returns None if valid, Some(reason) if invalid
pub fn validate_identifier(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some("name cannot be empty");
    }
    if !is_identifier(name) {
        return Some("name must start with a letter or underscore");
    }
    None
}

/// Check an identifier, raising `InvalidIdentifier` for `context` on failure.
pub fn check_identifier(name: &str, context: &str) -> Result<()> {
    match validate_identifier(name) {
        Some(reason) => Err(Error::invalid_identifier(name, context, reason)),
        None => Ok(()),
    }
}

/// Check a name that additionally must not be a reserved word
/// (class-likes, aliases).
pub fn check_type_name(name: &str, context: &str) -> Result<()> {
    check_identifier(name, context)?;
    if is_keyword(name) {
        return Err(Error::invalid_identifier(
            name,
            context,
            "name is a reserved word",
        ));
    }
    Ok(())
}

/// Check a qualified name such as a namespace or attribute name.
pub fn check_qualified_name(name: &str, context: &str, allow_leading_separator: bool) -> Result<()> {
    if !is_namespace_identifier(name, allow_leading_separator) {
        return Err(Error::invalid_identifier(
            name,
            context,
            "name must be a sequence of identifiers joined by '\\'",
        ));
    }
    Ok(())
}

/// Last segment of a qualified name: `A\B\C` -> `C`.
pub fn extract_short_name(name: &str) -> &str {
    match name.rfind(SEPARATOR) {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Everything before the last segment: `A\B\C` -> `A\B`.
pub fn extract_namespace(name: &str) -> &str {
    match name.rfind(SEPARATOR) {
        Some(pos) => &name[..pos],
        None => "",
    }
}

/// Strip the leading separator of a fully-qualified spelling.
pub fn trim_leading_separator(name: &str) -> &str {
    name.strip_prefix(SEPARATOR).unwrap_or(name)
}
