//! Stack safety for deep pattern trees.
//!
//! Matching recurses once per pattern node and once more per continuation
//! hop, so a programmatically built conjunction or chain with thousands of
//! links can exhaust a thread's stack. Every descent in the engine goes
//! through [`ensure_sufficient_stack`], and so does pattern `Display`.
//! Dropping a pattern tree does not recurse at all.
//!
//! - **Native targets**: `stacker` grows the stack on demand.
//! - **WASM targets**: passthrough (WASM manages its own stack).

/// Grow when less than this much stack remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if the red zone has been reached.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
