//! Conversion of [`Value`]s into PHP literal expressions.

use phpgen_core::builder::{Indent, indent_lines};
use phpgen_core::text::{unix_newlines, width};
use phpgen_core::{Error, Result};
use tracing::trace;

use crate::escape::{quote_bytes, quote_str};
use crate::value::STD_CLASS;
use crate::{Array, Callable, Key, Literal, ObjectRef, Value};

/// Width one nesting level is assumed to take when deciding whether an
/// array fits on one line.
const INDENT_LENGTH: usize = 4;

/// Helper called to rebuild objects of arbitrary classes.
pub const DEFAULT_OBJECT_FACTORY: &str = "\\Phpgen\\ObjectFactory::create";

/// Dumps values as PHP literals.
///
/// # Example
///
/// ```
/// use phpgen_dumper::{Array, Dumper, Value};
///
/// let dumper = Dumper::new();
/// let value = Value::Array(Array::new().with(1).with_entry("key", "value"));
/// assert_eq!(dumper.dump(&value).unwrap(), "[1, 'key' => 'value']");
/// ```
#[derive(Debug, Clone)]
pub struct Dumper {
    /// Maximum nesting of arrays and objects.
    pub max_depth: usize,
    /// Column budget for inline arrays and argument lists.
    pub wrap_length: usize,
    /// Indentation of wrapped entries.
    pub indent: Indent,
    /// Static method used to recreate objects of custom classes.
    pub object_factory: String,
}

impl Default for Dumper {
    fn default() -> Self {
        Self {
            max_depth: 50,
            wrap_length: 120,
            indent: Indent::default(),
            object_factory: DEFAULT_OBJECT_FACTORY.to_string(),
        }
    }
}

/// Per-call recursion state.
#[derive(Default)]
pub(crate) struct Walk {
    /// Identities of the objects currently being dumped.
    parents: Vec<usize>,
    depth: usize,
}

impl Dumper {
    /// Create a dumper with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dump a value starting at column 0.
    pub fn dump(&self, value: &Value) -> Result<String> {
        self.dump_at(value, 0)
    }

    /// Dump a value that will be placed at `column` of the current line.
    pub fn dump_at(&self, value: &Value, column: usize) -> Result<String> {
        self.dump_var(value, &mut Walk::default(), 0, column)
    }

    pub(crate) fn dump_var(
        &self,
        value: &Value,
        walk: &mut Walk,
        level: usize,
        column: usize,
    ) -> Result<String> {
        match value {
            Value::Null => Ok("null".to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Int(n) => Ok(dump_int(*n)),
            Value::Float(f) => Ok(dump_float(*f)),
            Value::String(s) => Ok(quote_str(s)),
            Value::Bytes(b) => Ok(quote_bytes(b)),
            Value::Array(array) => self.dump_array(array, walk, level, column),
            Value::Object(object) => self.dump_object(object, walk, level, column),
            Value::EnumCase { class, case } => Ok(format!("{}::{case}", qualify(class))),
            Value::DateTime(dt) => self.format(
                &format!("new \\{}(?, new \\DateTimeZone(?))", dt.class_name()),
                &[Value::String(dt.formatted()), Value::String(dt.timezone.clone())],
            ),
            Value::Callable(Callable::Named { class: Some(class), name }) => {
                Ok(format!("{}::{name}(...)", qualify(class)))
            }
            Value::Callable(Callable::Named { class: None, name }) => Ok(format!("{name}(...)")),
            Value::Callable(Callable::Closure) => {
                Err(Error::unrenderable("Cannot dump object of type Closure."))
            }
            Value::Resource(kind) => Err(Error::unrenderable(format!(
                "Cannot dump value of type resource ({kind})."
            ))),
            Value::Literal(literal) => self.dump_literal(literal, level),
        }
    }

    fn enter(&self, walk: &mut Walk, identity: Option<usize>) -> Result<()> {
        if walk.depth >= self.max_depth || identity.is_some_and(|id| walk.parents.contains(&id)) {
            return Err(Error::unrenderable(
                "Nesting level too deep or recursive dependency.",
            ));
        }
        walk.depth += 1;
        if let Some(id) = identity {
            walk.parents.push(id);
        }
        Ok(())
    }

    fn leave(walk: &mut Walk, identity: Option<usize>) {
        walk.depth -= 1;
        if identity.is_some() {
            walk.parents.pop();
        }
    }

    pub(crate) fn dump_array(
        &self,
        array: &Array,
        walk: &mut Walk,
        level: usize,
        column: usize,
    ) -> Result<String> {
        if array.is_empty() {
            return Ok("[]".to_string());
        }
        self.enter(walk, None)?;
        let result = self.dump_array_entries(array, walk, level, column);
        Self::leave(walk, None);
        result
    }

    fn dump_array_entries(
        &self,
        array: &Array,
        walk: &mut Walk,
        level: usize,
        column: usize,
    ) -> Result<String> {
        let hide_keys = array.is_sequential();
        let first = array.first_key().cloned();
        let key_parts: Vec<String> = array
            .iter()
            .map(|(key, _)| {
                if hide_keys && (Some(key) != first.as_ref() || *key == Key::Int(0)) {
                    String::new()
                } else {
                    format!("{} => ", dump_key(key))
                }
            })
            .collect();

        // every entry is dumped once; both layouts reuse the text
        let mut entries = Vec::with_capacity(array.len());
        for ((_, value), key_part) in array.iter().zip(key_parts) {
            let dumped = self.dump_var(value, walk, level + 1, width(&key_part))?;
            entries.push(key_part + &dumped);
        }

        let inline = entries.join(", ");
        let fits = !inline.contains('\n')
            && level * INDENT_LENGTH + column + width(&inline) + 3 <= self.wrap_length;
        if fits {
            return Ok(format!("[{inline}]"));
        }
        trace!(level, column, "wrapping array literal");

        let space = self.indent.as_str().repeat(level);
        let indent = self.indent.as_str();
        let mut wrapped = format!("\n{space}");
        for entry in &entries {
            wrapped.push_str(indent);
            wrapped.push_str(entry);
            wrapped.push_str(",\n");
            wrapped.push_str(&space);
        }
        Ok(format!("[{wrapped}]"))
    }

    fn dump_object(
        &self,
        object: &ObjectRef,
        walk: &mut Walk,
        level: usize,
        column: usize,
    ) -> Result<String> {
        let identity = Some(object.id());
        self.enter(walk, identity)?;
        let result = self.dump_object_body(object, walk, level, column);
        Self::leave(walk, identity);
        result
    }

    fn dump_object_body(
        &self,
        object: &ObjectRef,
        walk: &mut Walk,
        level: usize,
        column: usize,
    ) -> Result<String> {
        let object = object.borrow();
        let Some(class) = object.class.as_deref() else {
            return Err(Error::unrenderable("Cannot dump object of anonymous class."));
        };

        if class.trim_start_matches('\\').eq_ignore_ascii_case(STD_CLASS) {
            let props: Array = object
                .properties
                .iter()
                .map(|(k, v)| (k.as_str(), v.clone()))
                .collect();
            let body = self.dump_array(&props, walk, level, column + 10)?;
            return Ok(format!("(object) {body}"));
        }

        let space = self.indent.as_str().repeat(level);
        let mut out = String::new();
        if !object.properties.is_empty() {
            out.push('\n');
            for (name, value) in &object.properties {
                out.push_str(&space);
                out.push_str(self.indent.as_str());
                out.push_str(&quote_str(name));
                out.push_str(" => ");
                out.push_str(&self.dump_var(value, walk, level + 1, 0)?);
                out.push_str(",\n");
            }
            out.push_str(&space);
        }
        Ok(format!(
            "{}({}::class, [{out}])",
            self.object_factory,
            qualify(class)
        ))
    }

    fn dump_literal(&self, literal: &Literal, level: usize) -> Result<String> {
        let text = match literal.args() {
            Some(args) => self.format(literal.value(), args)?,
            None => literal.value().to_string(),
        };
        let text = unix_newlines(&text);
        let text = text.trim();
        match text.split_once('\n') {
            Some((first, rest)) => Ok(format!(
                "{first}\n{}",
                indent_lines(rest, self.indent.as_str(), level)
            )),
            None => Ok(text.to_string()),
        }
    }

    /// Dump a list of call arguments, wrapping one per line when the joined
    /// form is longer than the wrap length or spans lines.
    pub(crate) fn dump_arguments(&self, args: &Array, column: usize, named: bool) -> Result<String> {
        let mut pairs = Vec::with_capacity(args.len());
        for (key, value) in args.iter() {
            let name = match key {
                Key::Str(name) if named => format!("{name}: "),
                _ => String::new(),
            };
            pairs.push(format!("{name}{}", self.dump(value)?));
        }

        let line = pairs.join(", ");
        if pairs.len() < 2 || (width(&line) + column <= self.wrap_length && !line.contains('\n')) {
            return Ok(line);
        }
        let indent = self.indent.as_str();
        Ok(format!(
            "\n{indent}{},\n",
            pairs.join(&format!(",\n{indent}"))
        ))
    }
}

/// Prefix a class name with the separator so it never resolves relatively.
fn qualify(class: &str) -> String {
    format!("\\{}", class.trim_start_matches('\\'))
}

fn dump_key(key: &Key) -> String {
    match key {
        Key::Int(n) => dump_int(*n),
        Key::Str(s) => quote_str(s),
    }
}

fn dump_int(n: i64) -> String {
    if n == i64::MIN {
        // the literal 9223372036854775808 would overflow to float
        format!("{} - 1", n + 1)
    } else {
        n.to_string()
    }
}

/// Dump a float so it can never be read back as an integer.
pub(crate) fn dump_float(f: f64) -> String {
    if f.is_nan() {
        return "\\NAN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "\\INF" } else { "-\\INF" }.to_string();
    }

    let scientific = format!("{f:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent > 16 {
        let mantissa = if mantissa.contains('.') {
            mantissa.to_string()
        } else {
            format!("{mantissa}.0")
        };
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}E{sign}{}", exponent.abs());
    }

    let plain = f.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}
