//! String literal escaping.

/// Characters that force the double-quoted form: control characters,
/// format characters and private-use code points.
fn is_special(c: char) -> bool {
    if c.is_control() {
        return true;
    }
    matches!(
        u32::from(c),
        0x00AD
            | 0x0600..=0x0605
            | 0x061C
            | 0x06DD
            | 0x070F
            | 0x0890..=0x0891
            | 0x08E2
            | 0x180E
            | 0x200B..=0x200F
            | 0x202A..=0x202E
            | 0x2060..=0x2064
            | 0x2066..=0x206F
            | 0xE000..=0xF8FF
            | 0xFEFF
            | 0xFFF9..=0xFFFB
            | 0x110BD
            | 0x110CD
            | 0x13430..=0x1343F
            | 0x1BCA0..=0x1BCA3
            | 0x1D173..=0x1D17A
            | 0xE0001
            | 0xE0020..=0xE007F
            | 0xF0000..=0xFFFFD
            | 0x100000..=0x10FFFD
    )
}

fn symbolic(c: char) -> Option<&'static str> {
    match c {
        '\r' => Some("\\r"),
        '\n' => Some("\\n"),
        '\t' => Some("\\t"),
        '\x1b' => Some("\\e"),
        '\\' => Some("\\\\"),
        '"' => Some("\\\""),
        '$' => Some("\\$"),
        _ => None,
    }
}

/// Quote UTF-8 text.
///
/// Text without special characters is single-quoted with only `'` and the
/// backslashes that would otherwise be ambiguous escaped. Anything else is
/// double-quoted with symbolic and hex escapes.
pub(crate) fn quote_str(s: &str) -> String {
    if !s.chars().any(is_special) {
        return single_quoted(s);
    }

    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if let Some(esc) = symbolic(c) {
            out.push_str(esc);
        } else if is_special(c) {
            if c.is_ascii() {
                out.push_str(&format!("\\x{:02X}", u32::from(c)));
            } else {
                out.push_str(&format!("\\u{{{:X}}}", u32::from(c)));
            }
        } else {
            out.push(c);
        }
    }
    out.push('"');
    out
}

fn single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' if matches!(chars.peek(), None | Some('\'') | Some('\\')) => {
                out.push_str("\\\\")
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Quote a binary string. Valid UTF-8 goes through [`quote_str`]; other
/// input is double-quoted with every control or high byte hex-escaped.
pub(crate) fn quote_bytes(bytes: &[u8]) -> String {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return quote_str(s);
    }

    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('"');
    for &b in bytes {
        let c = char::from(b);
        if let Some(esc) = symbolic(c) {
            out.push_str(esc);
        } else if b < 0x20 || b >= 0x7f {
            out.push_str(&format!("\\x{b:02X}"));
        } else {
            out.push(c);
        }
    }
    out.push('"');
    out
}
