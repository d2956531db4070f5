//! Text normalisation and doc-comment formatting.

/// Display width of `s` as counted against the wrap length.
pub fn width(s: &str) -> usize {
    s.chars().count()
}

/// Width of the text after the last newline of `s`.
pub fn last_line_width(s: &str) -> usize {
    match s.rfind('\n') {
        Some(pos) => width(&s[pos + 1..]),
        None => width(s),
    }
}

/// Convert `\r\n` and lone `\r` line endings to `\n`.
pub fn unix_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Normalise text: unix newlines, no trailing spaces or tabs on any line,
/// no leading or trailing blank lines.
pub fn normalize(s: &str) -> String {
    let unix = unix_newlines(s);
    let lines: Vec<&str> = unix
        .split('\n')
        .map(|line| line.trim_end_matches([' ', '\t']))
        .collect();
    lines.join("\n").trim_matches('\n').to_string()
}

/// Normalise a caller-supplied statement body so it ends with exactly one
/// newline, or is empty.
pub fn normalize_body(s: &str) -> String {
    let body = normalize(s);
    if body.is_empty() {
        body
    } else {
        body + "\n"
    }
}

/// Format a doc comment.
///
/// A single-line body renders as `/** text */`; a body containing a newline
/// (or any body when `force_multiline` is set) renders as a `/** ... */`
/// block with a leading `*` on each line. Returns an empty string for an
/// empty body. The result ends with a newline.
pub fn format_doc_comment(content: &str, force_multiline: bool) -> String {
    let body = content.trim().replace("*/", "* /");
    if body.is_empty() {
        return String::new();
    }
    if !force_multiline && !content.contains('\n') {
        return format!("/** {body} */\n");
    }

    let mut out = String::from("/**\n");
    for line in unix_newlines(&body).split('\n') {
        let line = format!(" * {line}");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.push_str(" */\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width() {
        assert_eq!(width("čau"), 3);
        assert_eq!(last_line_width("abc\nde"), 2);
        assert_eq!(last_line_width("abc"), 3);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("\n\na  \r\nb\t\n\n"), "a\nb");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("  keep leading"), "  keep leading");
    }

    #[test]
    fn test_normalize_body() {
        assert_eq!(normalize_body("return 1;"), "return 1;\n");
        assert_eq!(normalize_body("\n"), "");
    }

    #[test]
    fn test_single_line_doc() {
        assert_eq!(format_doc_comment("Hello", false), "/** Hello */\n");
        assert_eq!(format_doc_comment("  ", false), "");
    }

    #[test]
    fn test_multi_line_doc() {
        assert_eq!(
            format_doc_comment("Hello\n\n@return int", false),
            "/**\n * Hello\n *\n * @return int\n */\n"
        );
        assert_eq!(format_doc_comment("Hello", true), "/**\n * Hello\n */\n");
    }

    #[test]
    fn test_doc_close_is_escaped() {
        assert_eq!(format_doc_comment("a */ b", false), "/** a * / b */\n");
    }
}
