//! Type tags for instance checks.

use std::fmt;

use super::Value;

/// A type, or family of types, a value can be an instance of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeTag {
    Void,
    Bool,
    Int,
    Float,
    /// `Int` or `Float`.
    Number,
    Char,
    Str,
    List,
    Tuple,
    /// `List` or `Tuple`.
    Sequence,
    Map,
    /// Any record, whatever its type name.
    Record,
    /// A record with this exact type name.
    Named(String),
}

impl TypeTag {
    pub fn named(type_name: impl Into<String>) -> Self {
        TypeTag::Named(type_name.into())
    }

    /// Check whether `value` is an instance of this tag.
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (TypeTag::Void, Value::Void)
            | (TypeTag::Bool, Value::Bool(_))
            | (TypeTag::Int | TypeTag::Number, Value::Int(_))
            | (TypeTag::Float | TypeTag::Number, Value::Float(_))
            | (TypeTag::Char, Value::Char(_))
            | (TypeTag::Str, Value::Str(_))
            | (TypeTag::List | TypeTag::Sequence, Value::List(_))
            | (TypeTag::Tuple | TypeTag::Sequence, Value::Tuple(_))
            | (TypeTag::Map, Value::Map(_))
            | (TypeTag::Record, Value::Record(_)) => true,
            (TypeTag::Named(name), Value::Record(r)) => r.type_name() == name,
            _ => false,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Void => write!(f, "void"),
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::Int => write!(f, "int"),
            TypeTag::Float => write!(f, "float"),
            TypeTag::Number => write!(f, "number"),
            TypeTag::Char => write!(f, "char"),
            TypeTag::Str => write!(f, "str"),
            TypeTag::List => write!(f, "list"),
            TypeTag::Tuple => write!(f, "tuple"),
            TypeTag::Sequence => write!(f, "sequence"),
            TypeTag::Map => write!(f, "map"),
            TypeTag::Record => write!(f, "record"),
            TypeTag::Named(name) => write!(f, "{name}"),
        }
    }
}
