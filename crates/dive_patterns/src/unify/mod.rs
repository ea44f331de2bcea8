//! The matching engine.
//!
//! Matching is continuation-passing: a pattern never returns "matched" or
//! "did not match". Instead it calls `on_success` (zero, one or many times)
//! or `on_failure(failing_pattern, failing_value)`. Continuations run on the
//! stack of the pattern that invokes them, which is what scopes variable
//! bindings: a binding made before a success continuation is live for
//! exactly as long as that continuation runs.
//!
//! The returned `UnifyResult` is *not* the match outcome. It carries hard
//! faults from extractors and iteration, and any error a caller's own
//! continuation returns.

mod quantify;
mod transform;

use std::cell::{Cell, RefCell};

use dive_value::{Fault, Value};

use crate::errors::{MatchError, UnifyResult};
use crate::pattern::{Pattern, PatternKind};
use crate::stack::ensure_sufficient_stack;
use crate::step::Quantifier;
use crate::variable::Variable;

type OnSuccess<'a> = &'a dyn Fn() -> UnifyResult;
type OnFailure<'a> = &'a dyn Fn(&Pattern, &Value) -> UnifyResult;

/// Failure continuation that drops the failure.
fn ignore_failure(_: &Pattern, _: &Value) -> UnifyResult {
    Ok(())
}

impl Pattern {
    /// Match `value`, calling `on_success` for each way the pattern matches
    /// and `on_failure` with the failing sub-pattern and value otherwise.
    #[tracing::instrument(level = "trace", skip_all, fields(pattern = %self, value = %value))]
    pub fn unify<S, F>(&self, value: &Value, on_success: S, on_failure: F) -> UnifyResult
    where
        S: Fn() -> UnifyResult,
        F: Fn(&Pattern, &Value) -> UnifyResult,
    {
        self.unify_in(value, &on_success, &on_failure)
    }

    /// [`Pattern::unify`] with a failure continuation that does nothing.
    pub fn unify_silently<S>(&self, value: &Value, on_success: S) -> UnifyResult
    where
        S: Fn() -> UnifyResult,
    {
        self.unify(value, on_success, ignore_failure)
    }

    /// Strict mode: an unmatched value is an error.
    ///
    /// Returns [`MatchError::Unmatched`] with the first reported failure when
    /// the match ends without reaching `on_success`. A match that neither
    /// succeeds nor fails (e.g. `each` over an empty list) is not an error.
    pub fn unify_strict<S>(&self, value: &Value, on_success: S) -> Result<(), MatchError>
    where
        S: Fn() -> UnifyResult,
    {
        let succeeded = Cell::new(false);
        let first_failure: RefCell<Option<(String, Value)>> = RefCell::new(None);
        self.unify(
            value,
            || {
                succeeded.set(true);
                on_success()
            },
            |pattern, failed| {
                let mut slot = first_failure.borrow_mut();
                if slot.is_none() {
                    *slot = Some((pattern.to_string(), failed.clone()));
                }
                Ok(())
            },
        )?;
        match first_failure.into_inner() {
            Some((pattern, value)) if !succeeded.get() => {
                Err(MatchError::Unmatched { pattern, value })
            }
            _ => Ok(()),
        }
    }

    /// Whether the pattern matches `value` at least once.
    pub fn matches(&self, value: &Value) -> Result<bool, Fault> {
        Ok(self.count_matches(value)? > 0)
    }

    /// Number of times the pattern's success continuation fires on `value`.
    pub fn count_matches(&self, value: &Value) -> Result<usize, Fault> {
        let count = Cell::new(0usize);
        self.unify_silently(value, || {
            count.set(count.get() + 1);
            Ok(())
        })?;
        Ok(count.get())
    }

    pub(crate) fn unify_in(
        &self,
        value: &Value,
        on_success: OnSuccess<'_>,
        on_failure: OnFailure<'_>,
    ) -> UnifyResult {
        ensure_sufficient_stack(|| match self.kind() {
            PatternKind::Anything => on_success(),
            PatternKind::Nothing => on_failure(self, value),
            PatternKind::Constant(expected) => {
                if value == expected {
                    on_success()
                } else {
                    on_failure(self, value)
                }
            }
            PatternKind::Variable(variable) => {
                self.unify_variable(variable, value, on_success, on_failure)
            }
            PatternKind::And(first, second) => first.unify_in(
                value,
                &|| second.unify_in(value, on_success, on_failure),
                on_failure,
            ),
            PatternKind::Or(first, second) => {
                Pattern::unify_or(first, second, value, on_success, on_failure)
            }
            PatternKind::Extract { extractor, into } => {
                self.unify_extract(extractor, into, value, on_success, on_failure)
            }
            PatternKind::Guard { guard, into } => {
                self.unify_guard(guard, into, value, on_success, on_failure)
            }
            PatternKind::Quantify {
                quantifier:
                    Quantifier::Any {
                        must_exist,
                        only_once,
                    },
                into,
            } => self.unify_any(*must_exist, *only_once, into, value, on_success, on_failure),
            PatternKind::Quantify {
                quantifier: Quantifier::All,
                into,
            } => self.unify_all(into, value, on_success, on_failure),
        })
    }

    fn unify_variable(
        &self,
        variable: &Variable,
        value: &Value,
        on_success: OnSuccess<'_>,
        on_failure: OnFailure<'_>,
    ) -> UnifyResult {
        match variable.bound_equals(value) {
            Some(true) => on_success(),
            Some(false) => on_failure(self, value),
            None => {
                let _binding = variable.bind(value.clone());
                tracing::trace!(variable = %variable.id(), %value, "bound");
                on_success()
            }
        }
    }

    /// The right branch runs after the left one has returned, so none of the
    /// left branch's bindings are live while it runs. It runs at most once,
    /// and only if the left branch reported a failure.
    fn unify_or(
        first: &Pattern,
        second: &Pattern,
        value: &Value,
        on_success: OnSuccess<'_>,
        on_failure: OnFailure<'_>,
    ) -> UnifyResult {
        let first_failed = Cell::new(false);
        first.unify_in(value, on_success, &|_: &Pattern, _: &Value| -> UnifyResult {
            first_failed.set(true);
            Ok(())
        })?;
        if first_failed.get() {
            second.unify_in(value, on_success, on_failure)
        } else {
            Ok(())
        }
    }
}
