//! Namespace-scoped `use` aliases and name resolution.

use std::fmt;

use indexmap::IndexMap;
use phpgen_core::naming::{
    SEPARATOR, check_qualified_name, extract_namespace, extract_short_name, is_identifier,
    is_keyword, is_namespace_identifier, trim_leading_separator,
};
use phpgen_core::{Error, Result};
use tracing::trace;

/// Which alias table a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    /// Classes, interfaces, traits, enums, and namespaces.
    Type,
    Function,
    Constant,
}

impl NameKind {
    fn index(self) -> usize {
        match self {
            Self::Type => 0,
            Self::Function => 1,
            Self::Constant => 2,
        }
    }

    /// Marker used in tagged names.
    pub fn tag(self) -> char {
        match self {
            Self::Type => 'n',
            Self::Function => 'f',
            Self::Constant => 'c',
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'n' => Some(Self::Type),
            'f' => Some(Self::Function),
            'c' => Some(Self::Constant),
            _ => None,
        }
    }

    /// Keyword following `use` in an import statement.
    pub fn use_keyword(self) -> Option<&'static str> {
        match self {
            Self::Type => None,
            Self::Function => Some("function"),
            Self::Constant => Some("const"),
        }
    }

    pub const ALL: [NameKind; 3] = [Self::Type, Self::Function, Self::Constant];
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Type => "type",
            Self::Function => "function",
            Self::Constant => "constant",
        })
    }
}

fn starts_with_ci(haystack: &str, prefix: &str) -> bool {
    haystack.len() >= prefix.len()
        && haystack.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == SEPARATOR || !c.is_ascii()
}

/// Alias tables of one namespace.
///
/// # Example
///
/// ```
/// use phpgen_model::{NameKind, NameTable};
///
/// let mut names = NameTable::new("App\\Http").unwrap();
/// names.register("Psr\\Log\\LoggerInterface", None, NameKind::Type).unwrap();
///
/// assert_eq!(names.resolve("Psr\\Log\\LoggerInterface", NameKind::Type), "LoggerInterface");
/// assert_eq!(names.resolve("App\\Http\\Request", NameKind::Type), "Request");
/// assert_eq!(names.resolve("Other\\Thing", NameKind::Type), "\\Other\\Thing");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameTable {
    namespace: String,
    /// alias -> fully-qualified target, per kind
    aliases: [IndexMap<String, String>; 3],
    /// lowercased short names declared in the namespace, per kind
    declared: [Vec<String>; 3],
}

impl NameTable {
    /// Create the table of namespace `namespace` (`""` for the global one).
    pub fn new(namespace: &str) -> Result<Self> {
        if !namespace.is_empty() {
            check_qualified_name(namespace, "namespace", false)?;
        }
        Ok(Self {
            namespace: namespace.to_string(),
            ..Self::default()
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn qualify(&self, short: &str) -> String {
        if self.namespace.is_empty() {
            short.to_string()
        } else {
            format!("{}{SEPARATOR}{short}", self.namespace)
        }
    }

    /// Target of `alias`, compared case-insensitively.
    pub fn target_of(&self, alias: &str, kind: NameKind) -> Option<&str> {
        self.aliases[kind.index()]
            .iter()
            .find(|(a, _)| a.eq_ignore_ascii_case(alias))
            .map(|(_, t)| t.as_str())
    }

    /// Alias registered for exactly `target`.
    pub fn alias_of(&self, target: &str, kind: NameKind) -> Option<&str> {
        self.aliases[kind.index()]
            .iter()
            .find(|(_, t)| t.eq_ignore_ascii_case(target))
            .map(|(a, _)| a.as_str())
    }

    fn is_declared(&self, short: &str, kind: NameKind) -> bool {
        let lower = short.to_ascii_lowercase();
        self.declared[kind.index()].contains(&lower)
    }

    /// Fully-qualified name currently bound to `alias`, either by a `use`
    /// or by a declaration in this namespace.
    fn occupant(&self, alias: &str, kind: NameKind) -> Option<String> {
        if let Some(target) = self.target_of(alias, kind) {
            return Some(target.to_string());
        }
        self.is_declared(alias, kind).then(|| self.qualify(alias))
    }

    /// Record a class or function declared in this namespace so that no
    /// alias shadows it.
    pub fn declare(&mut self, short: &str, kind: NameKind) -> Result<()> {
        let own = self.qualify(short);
        if let Some(target) = self
            .target_of(short, kind)
            .filter(|t| !t.eq_ignore_ascii_case(&own))
        {
            return Err(Error::alias_conflict(short, target, own));
        }
        if !self.is_declared(short, kind) {
            self.declared[kind.index()].push(short.to_ascii_lowercase());
        }
        Ok(())
    }

    /// Forget a declaration made by [`declare`](Self::declare).
    pub fn undeclare(&mut self, short: &str, kind: NameKind) {
        let lower = short.to_ascii_lowercase();
        self.declared[kind.index()].retain(|d| *d != lower);
    }

    /// Register `name` under `alias`, deriving one when `None`, and return
    /// the alias in use.
    ///
    /// A derived alias starts as the last segment and grows by one leading
    /// segment at a time (`Bar`, `FooBar`, ...) while it is taken.
    pub fn register(&mut self, name: &str, alias: Option<&str>, kind: NameKind) -> Result<String> {
        if !is_namespace_identifier(name, true) || (is_identifier(name) && is_keyword(name)) {
            return Err(Error::invalid_identifier(
                name,
                "imported",
                "name must be a qualified name and not a reserved word",
            ));
        }
        let name = trim_leading_separator(name);

        let alias = match alias {
            Some(alias) => {
                if !is_identifier(alias) || is_keyword(alias) {
                    return Err(Error::invalid_identifier(
                        alias,
                        "alias",
                        "alias must be an identifier and not a reserved word",
                    ));
                }
                if let Some(existing) = self
                    .occupant(alias, kind)
                    .filter(|e| !e.eq_ignore_ascii_case(name))
                {
                    return Err(Error::alias_conflict(alias, existing, name));
                }
                alias.to_string()
            }
            None => match self.alias_of(name, kind) {
                Some(existing) => return Ok(existing.to_string()),
                None => self.derive_alias(name, kind)?,
            },
        };

        // keep the original spelling when the same binding is registered again
        if let Some(existing) = self
            .alias_of(name, kind)
            .filter(|e| e.eq_ignore_ascii_case(&alias))
        {
            return Ok(existing.to_string());
        }
        self.aliases[kind.index()].insert(alias.clone(), name.to_string());
        Ok(alias)
    }

    fn derive_alias(&self, name: &str, kind: NameKind) -> Result<String> {
        let mut alias = String::new();
        let mut occupant = None;
        for segment in name.rsplit(SEPARATOR) {
            alias.insert_str(0, segment);
            if is_keyword(&alias) {
                continue;
            }
            occupant = self.occupant(&alias, kind);
            let free = occupant
                .as_deref()
                .is_none_or(|o| o.eq_ignore_ascii_case(name));
            trace!(%alias, target = name, free, "deriving alias");
            if free {
                return Ok(alias);
            }
        }
        Err(Error::alias_conflict(
            alias,
            occupant.unwrap_or_default(),
            name,
        ))
    }

    /// Drop an alias, returning its target.
    pub fn remove(&mut self, alias: &str, kind: NameKind) -> Option<String> {
        let table = &mut self.aliases[kind.index()];
        let key = table.keys().find(|a| a.eq_ignore_ascii_case(alias))?.clone();
        table.shift_remove(&key)
    }

    /// All aliases of `kind` in registration order.
    pub fn aliases(&self, kind: NameKind) -> impl Iterator<Item = (&str, &str)> {
        self.aliases[kind.index()]
            .iter()
            .map(|(a, t)| (a.as_str(), t.as_str()))
    }

    /// Aliases that need a `use` statement, sorted by target.
    ///
    /// An alias equal to the namespace-relative spelling of its target is
    /// implicit and left out.
    pub fn uses(&self, kind: NameKind) -> Vec<(&str, &str)> {
        let mut uses: Vec<_> = self
            .aliases(kind)
            .filter(|(alias, target)| !self.qualify(alias).eq_ignore_ascii_case(target))
            .collect();
        uses.sort_by_cached_key(|(_, target)| target.replace(SEPARATOR, " "));
        uses
    }

    /// Shortest spelling of `name` valid inside this namespace.
    pub fn resolve(&self, name: &str, kind: NameKind) -> String {
        if name.is_empty() || is_keyword(name) {
            return name.to_string();
        }
        let name = trim_leading_separator(name);

        if kind != NameKind::Type {
            if let Some(alias) = self.alias_of(name, kind) {
                return alias.to_string();
            }
            let namespace = format!("{}{SEPARATOR}", extract_namespace(name));
            return self.resolve(&namespace, NameKind::Type) + extract_short_name(name);
        }

        let prefix = format!("{}{SEPARATOR}", self.namespace);
        let mut relative = (!self.namespace.is_empty() && starts_with_ci(name, &prefix))
            .then(|| &name[prefix.len()..]);
        let mut shortest: Option<String> = None;

        for (alias, target) in &self.aliases[NameKind::Type.index()] {
            if relative.is_some_and(|rel| {
                !rel.is_empty() && starts_with_ci(&format!("{rel}{SEPARATOR}"), &format!("{alias}{SEPARATOR}"))
            }) {
                relative = None;
            }
            if starts_with_ci(&format!("{name}{SEPARATOR}"), &format!("{target}{SEPARATOR}")) {
                let short = format!("{alias}{}", &name[target.len()..]);
                if shortest.as_ref().is_none_or(|s| s.len() > short.len()) {
                    shortest = Some(short);
                }
            }
        }

        match (shortest, relative) {
            (Some(short), Some(rel)) if short.len() < rel.len() => short,
            (_, Some(rel)) => rel.to_string(),
            (Some(short), None) => short,
            (None, None) if self.namespace.is_empty() => name.to_string(),
            (None, None) => format!("{SEPARATOR}{name}"),
        }
    }

    /// Fully-qualified form of a name written inside this namespace.
    pub fn expand(&self, name: &str, kind: NameKind) -> String {
        if name.is_empty() || is_keyword(name) {
            return name.to_string();
        }
        if let Some(absolute) = name.strip_prefix(SEPARATOR) {
            return absolute.to_string();
        }

        if kind != NameKind::Type {
            if let Some(target) = self.target_of(name, kind) {
                return target.to_string();
            }
            let namespace = extract_namespace(name);
            if namespace.is_empty() {
                return self.qualify(name);
            }
            return self.expand(&format!("{namespace}{SEPARATOR}"), NameKind::Type)
                + extract_short_name(name);
        }

        let (first, rest) = match name.split_once(SEPARATOR) {
            Some((first, rest)) => (first, Some(rest)),
            None => (name, None),
        };
        match (self.target_of(first, NameKind::Type), rest) {
            (Some(target), Some(rest)) => format!("{target}{SEPARATOR}{rest}"),
            (Some(target), None) => target.to_string(),
            (None, _) => self.qualify(name),
        }
    }

    /// Resolve every name inside a type expression such as `?Foo|Bar\Baz`.
    pub fn simplify_type(&self, ty: &str, kind: NameKind) -> String {
        let mut out = String::with_capacity(ty.len());
        let mut rest = ty;
        while let Some(start) = rest.find(is_name_char) {
            out.push_str(&rest[..start]);
            rest = &rest[start..];
            let end = rest.find(|c| !is_name_char(c)).unwrap_or(rest.len());
            out.push_str(&self.resolve(&rest[..end], kind));
            rest = &rest[end..];
        }
        out.push_str(rest);
        out
    }
}

const TAG_OPEN: &str = "/*(";
const TAG_CLOSE: &str = "*/";

/// Mark `name` for namespace-aware resolution at print time: `/*(n*/Name`.
///
/// Reserved words are returned as is.
pub fn tag_name(name: &str, kind: NameKind) -> String {
    if is_keyword(name) {
        name.to_string()
    } else {
        format!("{TAG_OPEN}{}{TAG_CLOSE}{name}", kind.tag())
    }
}

/// Replace tagged names in `code` with their spelling in `scope`, or with
/// the raw name when there is no scope.
pub fn simplify_tagged_names(code: &str, scope: Option<&NameTable>) -> String {
    let mut out = String::with_capacity(code.len());
    let mut rest = code;
    while let Some(pos) = rest.find(TAG_OPEN) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let after = &rest[TAG_OPEN.len()..];
        let kind = after.chars().next().and_then(NameKind::from_tag);
        let name_start = TAG_OPEN.len() + 1 + TAG_CLOSE.len();
        let tagged = kind.filter(|_| after[1..].starts_with(TAG_CLOSE));
        let name_len = rest
            .get(name_start..)
            .map(|tail| tail.find(|c| !is_name_char(c)).unwrap_or(tail.len()))
            .unwrap_or(0);

        match tagged {
            Some(kind) if name_len > 0 => {
                let name = &rest[name_start..name_start + name_len];
                match scope {
                    Some(table) => out.push_str(&table.simplify_type(name, kind)),
                    None => out.push_str(name),
                }
                rest = &rest[name_start + name_len..];
            }
            _ => {
                out.push_str(TAG_OPEN);
                rest = &rest[TAG_OPEN.len()..];
            }
        }
    }
    out.push_str(rest);
    out
}
