//! Record-like objects with named fields.

use std::fmt;

use rustc_hash::FxHashMap;

use super::Value;
use crate::heap::Heap;

// RecordLayout

/// Layout information for O(1) record field access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordLayout {
    /// Field names in slot order (sorted).
    names: Vec<String>,
    /// Map from field name to slot.
    slots: FxHashMap<String, usize>,
}

impl RecordLayout {
    /// Create a layout; names are sorted and deduplicated.
    pub fn new(mut names: Vec<String>) -> Self {
        names.sort();
        names.dedup();
        let slots = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        RecordLayout { names, slots }
    }

    pub fn get_index(&self, field: &str) -> Option<usize> {
        self.slots.get(field).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Field names in slot order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

// Record

/// Record instance: a type name plus named fields.
#[derive(Clone)]
pub struct Record {
    type_name: Heap<String>,
    /// Field values in layout order.
    fields: Heap<Vec<Value>>,
    layout: Heap<RecordLayout>,
}

impl Record {
    /// Create a record from a type name and `(field, value)` pairs.
    ///
    /// Later pairs win on duplicate field names.
    pub fn new<N: Into<String>>(
        type_name: impl Into<String>,
        fields: impl IntoIterator<Item = (N, Value)>,
    ) -> Self {
        let mut by_name: FxHashMap<String, Value> =
            fields.into_iter().map(|(n, v)| (n.into(), v)).collect();
        let layout = RecordLayout::new(by_name.keys().cloned().collect());
        let values = layout
            .names()
            .iter()
            .filter_map(|name| by_name.remove(name))
            .collect();
        Record {
            type_name: Heap::new(type_name.into()),
            fields: Heap::new(values),
            layout: Heap::new(layout),
        }
    }

    pub fn type_name(&self) -> &str {
        self.type_name.as_str()
    }

    /// Get a field value by name with O(1) lookup.
    pub fn get_field(&self, field: &str) -> Option<&Value> {
        let index = self.layout.get_index(field)?;
        self.fields.get(index)
    }

    /// Iterate `(name, value)` pairs in layout order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.layout
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.fields.iter())
    }

    pub fn layout(&self) -> &RecordLayout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
            && self.layout.names() == other.layout.names()
            && self.fields == other.fields
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.type_name());
        for (name, value) in self.fields() {
            s.field(name, value);
        }
        s.finish()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())?;
        if self.is_empty() {
            return Ok(());
        }
        write!(f, " {{ ")?;
        for (i, (name, value)) in self.fields().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests;
