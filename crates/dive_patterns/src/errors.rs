//! Result and error types for matching.
//!
//! Match *failure* is not an error: it is reported through the failure
//! continuation. `UnifyResult` only carries hard faults (and whatever errors
//! the caller's own continuations return). `MatchError` is the strict-mode
//! surface for callers that want an unmatched value to be an error.

use thiserror::Error;

use dive_value::{Fault, Value};

/// Result of running a pattern or one of its continuations.
pub type UnifyResult = Result<(), Fault>;

/// Error returned by [`crate::Pattern::unify_strict`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MatchError {
    /// No success was reached; carries the first reported failure.
    #[error("unification failed: {pattern} did not match {value}")]
    Unmatched { pattern: String, value: Value },

    #[error(transparent)]
    Fault(#[from] Fault),
}
