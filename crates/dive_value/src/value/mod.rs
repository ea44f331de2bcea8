//! Runtime values matched by patterns.
//!
//! # Heap Enforcement
//!
//! Heap payloads (strings, sequences, maps, records) are wrapped in
//! [`Heap`], whose constructor is crate-private. External code builds values
//! through the factory methods:
//!
//! ```text
//! let s = Value::string("hello");
//! let xs = Value::list(vec![Value::int(1), Value::int(2)]);
//! let m = Value::record(Record::new("Mock", [("foo", Value::int(42))]));
//! ```
//!
//! Cloning a `Value` is therefore a reference-count bump, which the pattern
//! engine relies on when it binds variables and walks collections.

mod elements;
mod record;
mod type_tag;

use std::fmt;

use rustc_hash::FxHashMap;

use crate::errors::{
    index_out_of_range, missing_field, missing_key, not_indexable, not_iterable, LookupResult,
};
use crate::heap::Heap;
use crate::Fault;

pub use elements::Elements;
pub use record::{Record, RecordLayout};
pub use type_tag::TypeTag;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    // Primitives (inline, no heap allocation)
    /// Unit value.
    Void,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),

    // Heap types
    Str(Heap<String>),
    List(Heap<Vec<Value>>),
    Tuple(Heap<Vec<Value>>),
    /// Map from string keys to values.
    Map(Heap<FxHashMap<String, Value>>),

    /// Record-like object with named fields.
    Record(Record),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a list value.
    ///
    /// # Example
    ///
    /// ```text
    /// let nums = Value::list(vec![Value::int(1), Value::int(2)]);
    /// ```
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    #[inline]
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Heap::new(items))
    }

    /// Create a map value from `(key, value)` entries.
    ///
    /// Later entries win on duplicate keys.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        let entries: FxHashMap<String, Value> =
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Value::Map(Heap::new(entries))
    }

    #[inline]
    pub fn record(record: Record) -> Self {
        Value::Record(record)
    }
}

// Value Methods

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Items of a list or tuple.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Name of the value's type, as used in fault messages.
    ///
    /// Records report their own type name.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Void => "void",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Map(_) => "map",
            Value::Record(r) => r.type_name(),
        }
    }

    /// Check whether this value is an instance of `tag`.
    #[inline]
    pub fn is_instance(&self, tag: &TypeTag) -> bool {
        tag.admits(self)
    }

    /// Look up a named field.
    ///
    /// Anything that is not a record has no fields, so the lookup reports a
    /// missing field rather than a shape error.
    pub fn field(&self, name: &str) -> LookupResult {
        match self {
            Value::Record(r) => r
                .get_field(name)
                .cloned()
                .ok_or_else(|| missing_field(r.type_name(), name)),
            _ => Err(missing_field(self.type_name(), name)),
        }
    }

    /// Look up a position in a list, tuple or string.
    ///
    /// Negative indices count from the end (`-1` is the last element). Maps
    /// are indexable too: the index is looked up as a key in decimal form,
    /// and a missing key is a soft fault.
    pub fn index(&self, index: i64) -> LookupResult {
        match self {
            Value::Map(_) => self.key(&index.to_string()),
            Value::List(items) | Value::Tuple(items) => resolve_index(index, items.len())
                .and_then(|i| items.get(i))
                .cloned()
                .ok_or_else(|| index_out_of_range(index, items.len())),
            Value::Str(s) => {
                let len = s.chars().count();
                resolve_index(index, len)
                    .and_then(|i| s.chars().nth(i))
                    .map(Value::Char)
                    .ok_or_else(|| index_out_of_range(index, len))
            }
            _ => Err(not_indexable(self.type_name())),
        }
    }

    /// Look up a key in a map.
    pub fn key(&self, key: &str) -> LookupResult {
        match self {
            Value::Map(map) => map.get(key).cloned().ok_or_else(|| missing_key(key)),
            _ => Err(not_indexable(self.type_name())),
        }
    }

    /// Iterate the elements of a collection.
    ///
    /// Lists and tuples yield their items in order, strings yield characters,
    /// and maps yield `(key, value)` tuples in ascending key order.
    pub fn elements(&self) -> Result<Elements<'_>, Fault> {
        match self {
            Value::List(items) | Value::Tuple(items) => Ok(Elements::items(items.as_slice())),
            Value::Str(s) => Ok(Elements::chars(s.as_str())),
            Value::Map(map) => Ok(Elements::entries(map)),
            _ => Err(not_iterable(self.type_name())),
        }
    }
}

/// Map a possibly negative index onto `0..len`.
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let resolved = if index < 0 {
        index.checked_add(len)?
    } else {
        index
    };
    if (0..len).contains(&resolved) {
        usize::try_from(resolved).ok()
    } else {
        None
    }
}

// Conversions

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

// Trait Implementations

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => write!(f, "Void"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Char(c) => write!(f, "Char({c:?})"),
            Value::Str(s) => write!(f, "Str({:?})", s.as_str()),
            Value::List(items) => write!(f, "List({:?})", items.as_slice()),
            Value::Tuple(items) => write!(f, "Tuple({:?})", items.as_slice()),
            Value::Map(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                f.debug_map().entries(entries).finish()
            }
            Value::Record(r) => write!(f, "{r:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => write!(f, "void"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Char(c) => write!(f, "'{c}'"),
            Value::Str(s) => write!(f, "\"{}\"", s.as_str()),
            Value::List(items) => {
                write!(f, "[")?;
                write_separated(f, items)?;
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                write_separated(f, items)?;
                write!(f, ")")
            }
            Value::Map(map) => {
                let mut keys: Vec<_> = map.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (i, k) in keys.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if let Some(v) = map.get(k) {
                        write!(f, "\"{k}\": {v}")?;
                    }
                }
                write!(f, "}}")
            }
            Value::Record(r) => write!(f, "{r}"),
        }
    }
}

fn write_separated(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Void, Value::Void) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k).is_some_and(|bv| v == bv))
            }
            (Value::Record(a), Value::Record(b)) => a == b,
            _ => false,
        }
    }
}
