//! Element iteration over collection values.

use std::slice;
use std::str::Chars;
use std::vec;

use rustc_hash::FxHashMap;

use super::Value;

/// Iterator over the elements of a collection value.
///
/// Yields owned `Value`s; heap payloads are shared, not copied.
pub enum Elements<'a> {
    Items(slice::Iter<'a, Value>),
    Chars(Chars<'a>),
    /// Map entries, pre-sorted by key for a stable order.
    Entries(vec::IntoIter<(&'a String, &'a Value)>),
}

impl<'a> Elements<'a> {
    pub(super) fn items(items: &'a [Value]) -> Self {
        Elements::Items(items.iter())
    }

    pub(super) fn chars(s: &'a str) -> Self {
        Elements::Chars(s.chars())
    }

    pub(super) fn entries(map: &'a FxHashMap<String, Value>) -> Self {
        let mut entries: Vec<_> = map.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        Elements::Entries(entries.into_iter())
    }
}

impl Iterator for Elements<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match self {
            Elements::Items(iter) => iter.next().cloned(),
            Elements::Chars(iter) => iter.next().map(Value::Char),
            Elements::Entries(iter) => iter
                .next()
                .map(|(k, v)| Value::tuple(vec![Value::string(k.as_str()), v.clone()])),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Elements::Items(iter) => iter.size_hint(),
            Elements::Chars(iter) => iter.size_hint(),
            Elements::Entries(iter) => iter.size_hint(),
        }
    }
}
