//! Lookup faults raised while deriving values.
//!
//! Faults fall into two classes:
//!
//! - **Soft**: missing field, missing key, index out of range. The pattern
//!   engine turns these into ordinary match failures.
//! - **Hard**: everything else. These signal a bug in the pattern or in a
//!   caller-supplied extractor and propagate to the caller of the match.
//!
//! Factory functions (e.g., `missing_field()`) are the public constructors.

use thiserror::Error;

use crate::value::Value;

/// Result of a fallible lookup on a `Value`.
pub type LookupResult = Result<Value, Fault>;

/// A fault raised by field, index, key or iteration access.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("no field `{field}` on {type_name}")]
    MissingField { type_name: String, field: String },

    #[error("key not found: \"{key}\"")]
    MissingKey { key: String },

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("cannot index into {type_name}")]
    NotIndexable { type_name: String },

    #[error("{type_name} is not iterable")]
    NotIterable { type_name: String },

    /// Raised by caller-supplied extractors for anything else.
    #[error("{message}")]
    Custom { message: String },
}

impl Fault {
    /// Whether the engine converts this fault into a match failure.
    #[inline]
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            Fault::MissingField { .. } | Fault::MissingKey { .. } | Fault::IndexOutOfRange { .. }
        )
    }
}

/// Named field absent, or the value has no fields at all.
#[cold]
pub fn missing_field(type_name: &str, field: &str) -> Fault {
    Fault::MissingField {
        type_name: type_name.to_string(),
        field: field.to_string(),
    }
}

/// Map key absent.
#[cold]
pub fn missing_key(key: &str) -> Fault {
    Fault::MissingKey {
        key: key.to_string(),
    }
}

/// Position outside `-len..len`.
#[cold]
pub fn index_out_of_range(index: i64, len: usize) -> Fault {
    Fault::IndexOutOfRange { index, len }
}

#[cold]
pub fn not_indexable(type_name: &str) -> Fault {
    Fault::NotIndexable {
        type_name: type_name.to_string(),
    }
}

#[cold]
pub fn not_iterable(type_name: &str) -> Fault {
    Fault::NotIterable {
        type_name: type_name.to_string(),
    }
}

/// Hard fault with a free-form message, for caller-supplied extractors.
#[cold]
pub fn custom(message: impl Into<String>) -> Fault {
    Fault::Custom {
        message: message.into(),
    }
}
