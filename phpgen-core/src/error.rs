use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for phpgen operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Kind of keyed member, used to scope duplicate and lookup errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Constant,
    Property,
    Method,
    Case,
    Parameter,
    Hook,
    TraitUse,
    Class,
    Function,
    Namespace,
    Alias,
}

impl std::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MemberKind::Constant => "constant",
            MemberKind::Property => "property",
            MemberKind::Method => "method",
            MemberKind::Case => "enum case",
            MemberKind::Parameter => "parameter",
            MemberKind::Hook => "hook",
            MemberKind::TraitUse => "trait use",
            MemberKind::Class => "class",
            MemberKind::Function => "function",
            MemberKind::Namespace => "namespace",
            MemberKind::Alias => "alias",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(phpgen::invalid_identifier),
        help("{reason}. Use only letters, numbers, and underscores, starting with a letter or underscore.")
    )]
    InvalidIdentifier {
        name: String,
        context: String,
        reason: String,
    },

    #[error("cannot add {kind} '{name}', because it already exists")]
    #[diagnostic(
        code(phpgen::duplicate_member),
        help("pass `overwrite = true` to replace the existing {kind}")
    )]
    DuplicateMember { kind: MemberKind, name: String },

    #[error("{kind} '{name}' not found")]
    #[diagnostic(code(phpgen::not_found))]
    NotFound { kind: MemberKind, name: String },

    #[error("{entity}: {message}")]
    #[diagnostic(code(phpgen::invariant))]
    Invariant { entity: String, message: String },

    #[error("{message}")]
    #[diagnostic(code(phpgen::unrenderable))]
    Unrenderable { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(phpgen::template),
        help("every placeholder consumes exactly one argument; escape a literal '?' as '\\?'")
    )]
    Template { message: String },

    #[error("alias '{alias}' used already for '{existing}', cannot use for '{requested}'")]
    #[diagnostic(code(phpgen::alias_conflict))]
    AliasConflict {
        alias: String,
        existing: String,
        requested: String,
    },

    #[error("failed to parse printer configuration")]
    #[diagnostic(code(phpgen::config))]
    Config {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    /// Create an invalid identifier error
    pub fn invalid_identifier(
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
    ) -> Box<Self> {
        Box::new(Error::InvalidIdentifier {
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }

    /// Create a duplicate member error
    pub fn duplicate(kind: MemberKind, name: impl Into<String>) -> Box<Self> {
        Box::new(Error::DuplicateMember {
            kind,
            name: name.into(),
        })
    }

    /// Create a lookup error
    pub fn not_found(kind: MemberKind, name: impl Into<String>) -> Box<Self> {
        Box::new(Error::NotFound {
            kind,
            name: name.into(),
        })
    }

    /// Create a structural invariant violation scoped to `entity`
    pub fn invariant(entity: impl Into<String>, message: impl Into<String>) -> Box<Self> {
        Box::new(Error::Invariant {
            entity: entity.into(),
            message: message.into(),
        })
    }

    /// Create an unrenderable value error
    pub fn unrenderable(message: impl Into<String>) -> Box<Self> {
        Box::new(Error::Unrenderable {
            message: message.into(),
        })
    }

    /// Create a template mismatch error
    pub fn template(message: impl Into<String>) -> Box<Self> {
        Box::new(Error::Template {
            message: message.into(),
        })
    }

    /// Create an alias conflict error
    pub fn alias_conflict(
        alias: impl Into<String>,
        existing: impl Into<String>,
        requested: impl Into<String>,
    ) -> Box<Self> {
        Box::new(Error::AliasConflict {
            alias: alias.into(),
            existing: existing.into(),
            requested: requested.into(),
        })
    }

    /// Create a configuration parse error from a toml error with source context
    pub fn config(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Config {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }
}
