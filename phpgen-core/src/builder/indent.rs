//! Indentation configuration for generated code.

use serde::Deserialize;

const SPACES: &str = "        ";

/// Indentation style for generated code.
///
/// Deserializes from `"tab"` or `{ spaces = 4 }`; a width outside 1 to 8 is
/// a deserialization error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "IndentRepr")]
pub enum Indent {
    /// Spaces with the specified width (1 to 8).
    Spaces(u8),
    /// Tab character.
    Tab,
}

/// Unchecked serialized form of [`Indent`].
#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum IndentRepr {
    Spaces(u8),
    Tab,
}

impl TryFrom<IndentRepr> for Indent {
    type Error = String;

    fn try_from(repr: IndentRepr) -> Result<Self, Self::Error> {
        match repr {
            IndentRepr::Spaces(n @ 1..=8) => Ok(Self::Spaces(n)),
            IndentRepr::Spaces(n) => {
                Err(format!("indentation width must be 1 to 8 spaces, got {n}"))
            }
            IndentRepr::Tab => Ok(Self::Tab),
        }
    }
}

impl Indent {
    /// Tab indentation, the generator's default style.
    pub const TAB: Self = Self::Tab;

    /// 4-space indentation (PSR-12).
    pub const PSR: Self = Self::Spaces(4);

    /// Convert to the string representation for one indent level.
    ///
    /// Widths built in code outside 1 to 8 are not rejected: `Spaces(0)`
    /// falls back to four spaces and wider values are capped at eight.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spaces(0) => &SPACES[..4],
            Self::Spaces(n) => &SPACES[..usize::from(*n).min(SPACES.len())],
            Self::Tab => "\t",
        }
    }

    /// Width of one level as counted against the wrap length.
    pub fn width(&self) -> usize {
        self.as_str().len()
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::TAB
    }
}
