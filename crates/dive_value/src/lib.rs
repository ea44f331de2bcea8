//! Dive Value - the host value model for the dive pattern engine.
//!
//! This crate provides:
//! - Runtime values (`Value`) with cheap, `Arc`-backed cloning
//! - Record-like objects (`Record`) with O(1) named-field lookup
//! - Type tags (`TypeTag`) for instance checks
//! - Lookup faults (`Fault`) raised by field, index, key and iteration access
//!
//! # Capabilities
//!
//! The pattern engine needs three things from the object under match, and
//! `Value` exposes each as a fallible method:
//!
//! - named-field lookup: [`Value::field`]
//! - indexed lookup: [`Value::index`] (positions) and [`Value::key`] (map keys)
//! - iteration: [`Value::elements`]
//!
//! Missing fields, missing keys and out-of-range indices are *soft* faults
//! (see [`Fault::is_soft`]). Everything else is a hard fault.

mod errors;
mod heap;
mod value;

pub use errors::{
    custom, index_out_of_range, missing_field, missing_key, not_indexable, not_iterable, Fault,
    LookupResult,
};
pub use heap::Heap;
pub use value::{Elements, Record, RecordLayout, TypeTag, Value};
