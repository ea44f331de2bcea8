//! Free-function builders.
//!
//! Thin wrappers over the [`Pattern`] and [`Step`] constructors, for pattern
//! trees that read better as nested calls than as method chains.

use dive_value::Value;

use crate::pattern::Pattern;
use crate::step::Step;

pub fn anything() -> Pattern {
    Pattern::anything()
}

pub fn nothing() -> Pattern {
    Pattern::nothing()
}

pub fn constant(value: impl Into<Value>) -> Pattern {
    Pattern::constant(value)
}

pub fn and(first: impl Into<Pattern>, second: impl Into<Pattern>) -> Pattern {
    first.into().and(second)
}

pub fn or(first: impl Into<Pattern>, second: impl Into<Pattern>) -> Pattern {
    first.into().or(second)
}

/// `step -> into`.
pub fn then(step: impl Into<Step>, into: impl Into<Pattern>) -> Pattern {
    step.into().then(into)
}

/// Chain `steps` right-associatively, ending in `last`.
///
/// `chain([a, b, c], p)` is `a.then(b.then(c.then(p)))`. An empty chain is
/// just `last`.
pub fn chain(steps: impl IntoIterator<Item = Step>, last: impl Into<Pattern>) -> Pattern {
    let steps: Vec<Step> = steps.into_iter().collect();
    steps
        .into_iter()
        .rev()
        .fold(last.into(), |into, step| step.then(into))
}
