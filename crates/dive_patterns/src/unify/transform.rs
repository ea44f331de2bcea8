//! Value-transforming patterns: extraction and guards.

use dive_value::Value;

use super::{OnFailure, OnSuccess};
use crate::errors::UnifyResult;
use crate::pattern::Pattern;
use crate::step::{Extractor, Guard};

impl Pattern {
    /// Soft lookup faults fail this node against the input value; any
    /// other fault propagates out of the match.
    pub(super) fn unify_extract(
        &self,
        extractor: &Extractor,
        into: &Pattern,
        value: &Value,
        on_success: OnSuccess<'_>,
        on_failure: OnFailure<'_>,
    ) -> UnifyResult {
        match extractor.extract(value) {
            Ok(derived) => into.unify_in(&derived, on_success, on_failure),
            Err(fault) if fault.is_soft() => {
                tracing::trace!(%extractor, %fault, "lookup missed");
                on_failure(self, value)
            }
            Err(fault) => {
                tracing::debug!(%extractor, %fault, "extractor fault propagated");
                Err(fault)
            }
        }
    }

    pub(super) fn unify_guard(
        &self,
        guard: &Guard,
        into: &Pattern,
        value: &Value,
        on_success: OnSuccess<'_>,
        on_failure: OnFailure<'_>,
    ) -> UnifyResult {
        if guard.admits(value) {
            into.unify_in(value, on_success, on_failure)
        } else {
            on_failure(self, value)
        }
    }
}
