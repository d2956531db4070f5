//! Declared types of properties, parameters, and return values.

/// A declared type plus its nullability flag.
///
/// The type text is kept as written (`int`, `Foo|Bar`, `\App\Model`); names
/// inside it are resolved against the namespace at print time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeHint {
    name: Option<String>,
    /// Render as `?T` (or `T|null` for unions).
    pub nullable: bool,
}

impl TypeHint {
    /// Parse a type, reading a leading `?` as the nullable flag.
    ///
    /// ```
    /// use phpgen_model::TypeHint;
    ///
    /// let ty = TypeHint::parse("?Foo");
    /// assert_eq!(ty.name(), Some("Foo"));
    /// assert!(ty.nullable);
    /// assert!(!TypeHint::parse("").is_set());
    /// ```
    pub fn parse(ty: &str) -> Self {
        let ty = ty.trim();
        let (name, nullable) = match ty.strip_prefix('?') {
            Some(rest) => (rest.trim(), true),
            None => (ty, false),
        };
        Self {
            name: (!name.is_empty()).then(|| name.to_string()),
            nullable,
        }
    }

    /// The type text without the nullable marker.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether a type is declared at all.
    pub fn is_set(&self) -> bool {
        self.name.is_some()
    }

    /// Whether the type is (case-insensitively) exactly `keyword`.
    pub fn is(&self, keyword: &str) -> bool {
        self.name.as_deref().is_some_and(|n| n.eq_ignore_ascii_case(keyword))
    }
}

impl From<&str> for TypeHint {
    fn from(ty: &str) -> Self {
        Self::parse(ty)
    }
}
