//! Code builder utility for generating properly indented code.

use super::Indent;

/// Fluent API for building code with proper indentation.
///
/// Supports both consuming methods (returning `Self`) for chaining and
/// mutable methods (returning `&mut Self`) for incremental assembly.
///
/// # Example (Consuming API)
///
/// ```
/// use phpgen_core::builder::{CodeBuilder, Indent};
///
/// let code = CodeBuilder::new(Indent::PSR)
///     .line("function main()")
///     .line("{")
///     .indent()
///     .line("echo 'Hello';")
///     .dedent()
///     .line("}")
///     .build();
///
/// assert_eq!(code, "function main()\n{\n    echo 'Hello';\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    // =========================================================================
    // Mutable API - methods prefixed with `push_`
    // =========================================================================

    /// Add a line of code with current indentation (mutable).
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        if !s.is_empty() {
            self.write_indent();
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (mutable).
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add `count` blank lines (mutable).
    pub fn push_blanks(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.buffer.push('\n');
        }
        self
    }

    /// Add raw text without indentation or newline (mutable).
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    /// Add multi-line text, indenting every non-empty line (mutable).
    ///
    /// A trailing newline is added when the text does not end with one.
    pub fn push_text(&mut self, s: &str) -> &mut Self {
        if s.is_empty() {
            return self;
        }
        for line in s.strip_suffix('\n').unwrap_or(s).split('\n') {
            self.push_line(line);
        }
        self
    }

    /// Increase indentation level (mutable).
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level (mutable).
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    // =========================================================================
    // Consuming API
    // =========================================================================

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.push_blank();
        self
    }

    /// Add raw text without indentation or newline.
    pub fn raw(mut self, s: &str) -> Self {
        self.push_raw(s);
        self
    }

    /// Add multi-line text at the current indentation.
    pub fn text(mut self, s: &str) -> Self {
        self.push_text(s);
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    /// Decrease indentation level.
    pub fn dedent(mut self) -> Self {
        self.push_dedent();
        self
    }

    /// Add a block with a closing line.
    ///
    /// # Example
    ///
    /// ```
    /// use phpgen_core::builder::{CodeBuilder, Indent};
    ///
    /// let code = CodeBuilder::new(Indent::PSR)
    ///     .block_with_close("namespace Foo", "}", |b: CodeBuilder| {
    ///         b.line("class Bar {}")
    ///     })
    ///     .build();
    ///
    /// assert_eq!(code, "namespace Foo\n{\n    class Bar {}\n}\n");
    /// ```
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).line("{").indent();
        f(builder).dedent().line(close)
    }

    /// Conditionally add content.
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::new(Indent::default())
    }
}

/// Indent every non-empty line of `s` by one level.
pub fn indent_block(s: &str, indent: Indent) -> String {
    indent_lines(s, indent.as_str(), 1)
}

/// Indent every non-empty line of `s` by `level` repetitions of `unit`.
pub fn indent_lines(s: &str, unit: &str, level: usize) -> String {
    if level == 0 {
        return s.to_string();
    }
    let prefix = unit.repeat(level);
    let mut out = String::with_capacity(s.len() + prefix.len() * 4);
    for (i, line) in s.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if !line.is_empty() {
            out.push_str(&prefix);
        }
        out.push_str(line);
    }
    out
}
