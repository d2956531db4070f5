//! Printer settings, loadable from a TOML document.

use phpgen_core::{Error, Indent, Result};
use phpgen_dumper::Dumper;
use serde::Deserialize;

/// Formatting options of a [`Printer`](crate::Printer).
///
/// Every field is optional in TOML; missing ones take the tab-style
/// defaults.
///
/// ```
/// use phpgen_core::Indent;
/// use phpgen_printer::PrinterConfig;
///
/// let config = PrinterConfig::from_toml_str("indentation = { spaces = 2 }").unwrap();
/// assert_eq!(config.indentation, Indent::Spaces(2));
/// assert_eq!(config.wrap_length, 120);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrinterConfig {
    /// One indentation level
    pub indentation: Indent,

    /// Column budget before lists wrap
    pub wrap_length: usize,

    /// Blank lines between properties (and constants, enum cases)
    pub lines_between_properties: usize,

    /// Blank lines between methods
    pub lines_between_methods: usize,

    /// Blank lines between the `use` groups of types, functions, constants
    pub lines_between_use_types: usize,

    /// Separator between a parameter list and its return type
    pub return_type_colon: String,

    /// Put the opening brace of functions and methods on its own line
    pub braces_on_next_line: bool,

    /// Keep a lone parameter on the signature line even when it is promoted
    /// or carries attributes
    pub single_parameter_on_one_line: bool,

    /// Skip namespaces without declarations when printing a file
    pub omit_empty_namespaces: bool,

    /// Shorten names against the namespace's `use` aliases
    pub resolve_types: bool,

    /// Nesting limit for dumped values
    pub max_depth: usize,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            indentation: Indent::TAB,
            wrap_length: 120,
            lines_between_properties: 0,
            lines_between_methods: 2,
            lines_between_use_types: 0,
            return_type_colon: ": ".to_string(),
            braces_on_next_line: true,
            single_parameter_on_one_line: false,
            omit_empty_namespaces: true,
            resolve_types: true,
            max_depth: 50,
        }
    }
}

impl PrinterConfig {
    /// PSR-12 layout: four spaces, single blank lines between methods and
    /// between `use` groups.
    pub fn psr() -> Self {
        Self {
            indentation: Indent::PSR,
            lines_between_methods: 1,
            lines_between_use_types: 1,
            ..Self::default()
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        Self::from_toml_named(src, "phpgen.toml")
    }

    /// Parse a TOML document, naming it `filename` in diagnostics.
    pub fn from_toml_named(src: &str, filename: &str) -> Result<Self> {
        toml::from_str(src).map_err(|e| Error::config(e, src, filename))
    }

    /// The dumper used for values embedded in the printed code.
    pub fn dumper(&self) -> Dumper {
        Dumper {
            max_depth: self.max_depth,
            wrap_length: self.wrap_length,
            indent: self.indentation,
            ..Dumper::default()
        }
    }
}
