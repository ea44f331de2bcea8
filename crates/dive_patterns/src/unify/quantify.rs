//! Collection quantifiers.
//!
//! Per-element failures never reach the outer failure continuation; a
//! quantifier reports failure once, as itself, against the whole collection.
//! Iterating a value that is not a collection is a hard fault.

use std::cell::Cell;

use dive_value::Value;

use super::{ignore_failure, OnFailure, OnSuccess};
use crate::errors::UnifyResult;
use crate::pattern::Pattern;
use crate::stack::ensure_sufficient_stack;

impl Pattern {
    /// `first`, `some`, `each` and the general `any(must_exist, only_once)`.
    ///
    /// The outer success continuation runs once per qualifying element, in
    /// iteration order, inside that element's bindings.
    pub(super) fn unify_any(
        &self,
        must_exist: bool,
        only_once: bool,
        into: &Pattern,
        value: &Value,
        on_success: OnSuccess<'_>,
        on_failure: OnFailure<'_>,
    ) -> UnifyResult {
        let matched = Cell::new(false);
        let hit = || {
            matched.set(true);
            ensure_sufficient_stack(on_success)
        };
        for element in value.elements()? {
            into.unify_in(&element, &hit, &ignore_failure)?;
            if only_once && matched.get() {
                break;
            }
        }
        tracing::trace!(must_exist, only_once, matched = matched.get(), "quantifier done");
        if must_exist && !matched.get() {
            on_failure(self, value)
        } else {
            Ok(())
        }
    }

    /// `all`: every element must reach `into`'s success continuation.
    ///
    /// The outer success continuation runs exactly once, after the last
    /// element passed; per-element bindings are already unwound by then. An
    /// empty collection passes vacuously.
    pub(super) fn unify_all(
        &self,
        into: &Pattern,
        value: &Value,
        on_success: OnSuccess<'_>,
        on_failure: OnFailure<'_>,
    ) -> UnifyResult {
        for (position, element) in value.elements()?.enumerate() {
            let passed = Cell::new(false);
            into.unify_in(
                &element,
                &|| -> UnifyResult {
                    passed.set(true);
                    Ok(())
                },
                &ignore_failure,
            )?;
            if !passed.get() {
                tracing::trace!(position, "element rejected");
                return on_failure(self, value);
            }
        }
        on_success()
    }
}
