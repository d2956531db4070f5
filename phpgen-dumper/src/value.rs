//! Runtime values that can be dumped as PHP literals.
//!
//! Values represent the *data*, not syntax. The [`Dumper`](crate::Dumper)
//! decides how to spell them.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::Literal;

/// A value of the closed set the dumper understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `null`.
    Null,
    /// `true` / `false`.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// UTF-8 text.
    String(String),
    /// Binary string that need not be valid UTF-8.
    Bytes(Vec<u8>),
    /// Ordered array with integer and string keys.
    Array(Array),
    /// Shared object handle; identity is the handle, not the contents.
    Object(ObjectRef),
    /// A case of an enumeration, e.g. `\Suit::Hearts`.
    EnumCase {
        /// Fully-qualified enum name.
        class: String,
        /// Case name.
        case: String,
    },
    /// Date/time value.
    DateTime(DateTime),
    /// Callable value.
    Callable(Callable),
    /// Open resource handle (never renderable).
    Resource(String),
    /// Pre-formatted expression emitted verbatim.
    Literal(Literal),
}

impl Value {
    /// Create a string value.
    pub fn string(v: impl Into<String>) -> Self {
        Self::String(v.into())
    }

    /// Create an array value from list items.
    pub fn list(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Self::Array(Array::list(items))
    }

    /// Create an enum case value.
    pub fn enum_case(class: impl Into<String>, case: impl Into<String>) -> Self {
        Self::EnumCase {
            class: class.into(),
            case: case.into(),
        }
    }

    /// Create a literal expression value.
    pub fn literal(expr: impl Into<String>) -> Self {
        Self::Literal(Literal::new(expr))
    }

    /// Returns true for `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Name of the type as the host language reports it.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) | Self::Bytes(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) | Self::DateTime(_) => "object",
            Self::EnumCase { .. } => "enum",
            Self::Callable(_) => "Closure",
            Self::Resource(_) => "resource",
            Self::Literal(_) => "literal",
        }
    }

    /// Text of a string value, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Literal> for Value {
    fn from(v: Literal) -> Self {
        Self::Literal(v)
    }
}

impl From<ObjectRef> for Value {
    fn from(v: ObjectRef) -> Self {
        Self::Object(v)
    }
}

impl From<DateTime> for Value {
    fn from(v: DateTime) -> Self {
        Self::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::list(v)
    }
}

/// Array key. Decimal strings in canonical form are normalised to integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    fn normalize(s: String) -> Self {
        match s.parse::<i64>() {
            Ok(n) if is_canonical_int(&s) => Self::Int(n),
            _ => Self::Str(s),
        }
    }
}

fn is_canonical_int(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if digits == "0" {
        return s == "0";
    }
    !digits.starts_with('0')
}

impl From<i64> for Key {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Key {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for Key {
    fn from(v: &str) -> Self {
        Self::normalize(v.to_string())
    }
}

impl From<String> for Key {
    fn from(v: String) -> Self {
        Self::normalize(v)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{n}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

/// Ordered map with host-language array semantics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array {
    entries: IndexMap<Key, Value>,
    next_index: i64,
}

impl Array {
    /// Create an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list from values, keyed 0, 1, 2, ...
    pub fn list(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        let mut array = Array::new();
        for item in items {
            array.push(item);
        }
        array
    }

    /// Append a value at the next integer index.
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        let key = Key::Int(self.next_index);
        self.insert(key, value)
    }

    /// Insert or replace the value stored under `key`.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        if let Key::Int(n) = key {
            self.next_index = self.next_index.max(n.saturating_add(1));
        }
        self.entries.insert(key, value.into());
        self
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.push(value);
        self
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_entry(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value by key.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.entries.get(&key.into())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the array is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter()
    }

    /// Iterate over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    /// Whether the keys are integers counting up by one from the first key.
    pub fn is_sequential(&self) -> bool {
        let mut expected = None;
        for key in self.entries.keys() {
            match (key, expected) {
                (Key::Int(n), None) => expected = Some(n.saturating_add(1)),
                (Key::Int(n), Some(e)) if *n == e => expected = Some(e.saturating_add(1)),
                _ => return false,
            }
        }
        true
    }

    /// First key, if any.
    pub fn first_key(&self) -> Option<&Key> {
        self.entries.keys().next()
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Array {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut array = Array::new();
        for (k, v) in iter {
            array.insert(k, v);
        }
        array
    }
}

/// An object: a class name plus its property map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    /// Fully-qualified class name; `None` for anonymous classes.
    pub class: Option<String>,
    /// Property values keyed by property name.
    pub properties: IndexMap<String, Value>,
}

impl Object {
    /// Create an object of the given class.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            properties: IndexMap::new(),
        }
    }

    /// Create a generic `stdClass` object.
    pub fn std_class() -> Self {
        Self::new(STD_CLASS)
    }

    /// Create an instance of an anonymous class.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Set a property value.
    pub fn property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

pub(crate) const STD_CLASS: &str = "stdClass";

/// Shared handle to an [`Object`].
///
/// Two handles are equal only when they point at the same object, which is
/// what the dumper's cycle detection relies on.
#[derive(Debug, Clone)]
pub struct ObjectRef(Rc<RefCell<Object>>);

impl ObjectRef {
    /// Wrap an object in a new shared handle.
    pub fn new(object: Object) -> Self {
        Self(Rc::new(RefCell::new(object)))
    }

    /// Borrow the object.
    pub fn borrow(&self) -> std::cell::Ref<'_, Object> {
        self.0.borrow()
    }

    /// Mutably borrow the object.
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, Object> {
        self.0.borrow_mut()
    }

    /// Identity of the handle.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A date/time value rendered as a constructor call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTime {
    /// `DateTimeImmutable` when true, `DateTime` otherwise.
    pub immutable: bool,
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub microsecond: u32,
    /// Time zone identifier, e.g. `UTC` or `Europe/Prague`.
    pub timezone: String,
}

impl DateTime {
    /// Create an immutable date at midnight UTC.
    pub fn date(year: i32, month: u8, day: u8) -> Self {
        Self {
            immutable: true,
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            microsecond: 0,
            timezone: "UTC".to_string(),
        }
    }

    /// Set the time of day.
    pub fn at(mut self, hour: u8, minute: u8, second: u8) -> Self {
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self
    }

    /// Set the microsecond part.
    pub fn micros(mut self, microsecond: u32) -> Self {
        self.microsecond = microsecond;
        self
    }

    /// Set the time zone identifier.
    pub fn timezone(mut self, tz: impl Into<String>) -> Self {
        self.timezone = tz.into();
        self
    }

    /// Make this a mutable `DateTime`.
    pub fn mutable(mut self) -> Self {
        self.immutable = false;
        self
    }

    /// Class name without leading separator.
    pub fn class_name(&self) -> &'static str {
        if self.immutable {
            "DateTimeImmutable"
        } else {
            "DateTime"
        }
    }

    /// Components formatted as `Y-m-d H:i:s.u`.
    pub fn formatted(&self) -> String {
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:06}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.microsecond
        )
    }
}

/// A callable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callable {
    /// Named function or static method; dumps as first-class callable syntax.
    Named {
        /// Class for a static method, `None` for a function.
        class: Option<String>,
        /// Function or method name.
        name: String,
    },
    /// Anonymous closure capturing runtime state (never renderable).
    Closure,
}

impl Callable {
    /// A named global function.
    pub fn function(name: impl Into<String>) -> Self {
        Self::Named {
            class: None,
            name: name.into(),
        }
    }

    /// A static method.
    pub fn method(class: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Named {
            class: Some(class.into()),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_uses_next_index() {
        let mut array = Array::new();
        array.insert(5, "a").push("b");
        let keys: Vec<_> = array.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec![Key::Int(5), Key::Int(6)]);
    }

    #[test]
    fn test_numeric_string_keys_are_normalized() {
        assert_eq!(Key::from("12"), Key::Int(12));
        assert_eq!(Key::from("-3"), Key::Int(-3));
        assert_eq!(Key::from("0"), Key::Int(0));
        assert_eq!(Key::from("012"), Key::Str("012".into()));
        assert_eq!(Key::from("-0"), Key::Str("-0".into()));
        assert_eq!(Key::from("1.5"), Key::Str("1.5".into()));
        assert_eq!(Key::from(""), Key::Str(String::new()));
        assert_eq!(Key::from("-"), Key::Str("-".into()));
    }

    #[test]
    fn test_is_sequential() {
        let list = Array::list([1, 2, 3]);
        assert!(list.is_sequential());

        let shifted = Array::new().with_entry(3, 1).with_entry(4, 2);
        assert!(shifted.is_sequential());

        let gap = Array::new().with_entry(0, 1).with_entry(2, 2);
        assert!(!gap.is_sequential());

        let named = Array::new().with_entry("a", 1);
        assert!(!named.is_sequential());
    }

    #[test]
    fn test_object_identity() {
        let a = ObjectRef::new(Object::std_class());
        let b = ObjectRef::new(Object::std_class());
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_datetime_formatted() {
        let dt = DateTime::date(2024, 1, 2).at(3, 4, 5).micros(6);
        assert_eq!(dt.formatted(), "2024-01-02 03:04:05.000006");
    }
}
