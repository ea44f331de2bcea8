//! Chainable steps: the value-transforming half of the pattern language.
//!
//! A [`Step`] derives something from the value under match (a field, an
//! element, a checked value, each element of a collection) and hands it to
//! the next pattern. Steps are open: they become a [`Pattern`] only once
//! [`Step::then`] gives them a continuation, or through `From<Step>`, which
//! appends [`Pattern::anything`].
//!
//! # Associativity
//!
//! Chaining associates to the right:
//!
//! ```text
//! Step::field("bar").then(Step::index(1).then(&v))   // bar -> [1] -> ?v
//! ```
//!
//! `then` returns a closed `Pattern`, which has no `then` method, so the
//! left-grouped form `a.then(b).then(c)` is rejected at compile time.
//! [`crate::chain`] folds a whole sequence of steps right-to-left.

use std::fmt;
use std::rc::Rc;

use dive_value::{Fault, LookupResult, TypeTag, Value};

use crate::pattern::{Pattern, PatternKind};
use crate::variable::Variable;

/// Caller-supplied extraction function.
pub type ExtractFn = dyn Fn(&Value) -> LookupResult;

/// Caller-supplied predicate.
pub type PredicateFn = dyn Fn(&Value) -> bool;

/// How an `Extract` pattern derives its value.
#[derive(Clone)]
pub enum Extractor {
    /// Named record field.
    Field(String),
    /// Position in a list, tuple or string.
    Index(i64),
    /// Map key.
    Key(String),
    /// Arbitrary function; `label` is used for display only.
    Get { label: String, f: Rc<ExtractFn> },
}

impl Extractor {
    /// Derive a value from `value`.
    pub fn extract(&self, value: &Value) -> Result<Value, Fault> {
        match self {
            Extractor::Field(name) => value.field(name),
            Extractor::Index(index) => value.index(*index),
            Extractor::Key(key) => value.key(key),
            Extractor::Get { f, .. } => f(value),
        }
    }
}

impl fmt::Display for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extractor::Field(name) => write!(f, ".{name}"),
            Extractor::Index(index) => write!(f, "[{index}]"),
            Extractor::Key(key) => write!(f, "[{key:?}]"),
            Extractor::Get { label, .. } => write!(f, "get({label})"),
        }
    }
}

/// How a `Guard` pattern decides whether to forward its value.
#[derive(Clone)]
pub enum Guard {
    /// Instance check.
    Subtype(TypeTag),
    /// Caller-supplied predicate; `label` is used for display only.
    When { label: String, f: Rc<PredicateFn> },
}

impl Guard {
    pub fn admits(&self, value: &Value) -> bool {
        match self {
            Guard::Subtype(tag) => value.is_instance(tag),
            Guard::When { f, .. } => f(value),
        }
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::Subtype(tag) => write!(f, "is {tag}"),
            Guard::When { label, .. } => write!(f, "if({label})"),
        }
    }
}

/// Policy for applying a pattern across a collection's elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantifier {
    /// Succeed once per qualifying element.
    ///
    /// `must_exist`: fail when no element qualifies.
    /// `only_once`: stop after the first qualifying element.
    Any { must_exist: bool, only_once: bool },
    /// Every element must qualify; succeeds once for the whole collection.
    All,
}

impl Quantifier {
    /// The first qualifying element; fail if none.
    pub const FIRST: Quantifier = Quantifier::Any {
        must_exist: true,
        only_once: true,
    };
    /// Every qualifying element; fail if none.
    pub const SOME: Quantifier = Quantifier::Any {
        must_exist: true,
        only_once: false,
    };
    /// Every qualifying element; never fails.
    pub const EACH: Quantifier = Quantifier::Any {
        must_exist: false,
        only_once: false,
    };
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Quantifier::FIRST => write!(f, "first"),
            Quantifier::SOME => write!(f, "some"),
            Quantifier::EACH => write!(f, "each"),
            Quantifier::Any {
                must_exist,
                only_once,
            } => write!(f, "any(must_exist: {must_exist}, only_once: {only_once})"),
            Quantifier::All => write!(f, "all"),
        }
    }
}

/// An open, chainable pattern awaiting its continuation.
#[derive(Clone)]
pub enum Step {
    Extract(Extractor),
    Guard(Guard),
    Quantify(Quantifier),
    /// Bind (or compare against) a variable, then continue on the same value.
    Bind(Variable),
}

impl Step {
    /// Look up a named field.
    pub fn field(name: impl Into<String>) -> Self {
        Step::Extract(Extractor::Field(name.into()))
    }

    /// Look up a position; negative indices count from the end.
    pub fn index(index: i64) -> Self {
        Step::Extract(Extractor::Index(index))
    }

    pub fn key(key: impl Into<String>) -> Self {
        Step::Extract(Extractor::Key(key.into()))
    }

    /// Derive a value with `f`.
    ///
    /// Soft faults returned by `f` become match failures; any other fault
    /// propagates to the caller of the match.
    pub fn get(f: impl Fn(&Value) -> LookupResult + 'static) -> Self {
        Step::get_labeled("fn", f)
    }

    pub fn get_labeled(
        label: impl Into<String>,
        f: impl Fn(&Value) -> LookupResult + 'static,
    ) -> Self {
        Step::Extract(Extractor::Get {
            label: label.into(),
            f: Rc::new(f),
        })
    }

    /// Continue only if the value is an instance of `tag`.
    pub fn subtype(tag: TypeTag) -> Self {
        Step::Guard(Guard::Subtype(tag))
    }

    /// Continue only if `f` holds for the value.
    pub fn when(f: impl Fn(&Value) -> bool + 'static) -> Self {
        Step::when_labeled("fn", f)
    }

    pub fn when_labeled(label: impl Into<String>, f: impl Fn(&Value) -> bool + 'static) -> Self {
        Step::Guard(Guard::When {
            label: label.into(),
            f: Rc::new(f),
        })
    }

    pub fn first() -> Self {
        Step::Quantify(Quantifier::FIRST)
    }

    pub fn some() -> Self {
        Step::Quantify(Quantifier::SOME)
    }

    pub fn each() -> Self {
        Step::Quantify(Quantifier::EACH)
    }

    pub fn any(must_exist: bool, only_once: bool) -> Self {
        Step::Quantify(Quantifier::Any {
            must_exist,
            only_once,
        })
    }

    pub fn all() -> Self {
        Step::Quantify(Quantifier::All)
    }

    pub fn bind(variable: &Variable) -> Self {
        Step::Bind(variable.clone())
    }

    /// Close this step by feeding its result into `into`.
    pub fn then(self, into: impl Into<Pattern>) -> Pattern {
        let into = into.into();
        match self {
            Step::Extract(extractor) => {
                Pattern::from_kind(PatternKind::Extract { extractor, into })
            }
            Step::Guard(guard) => Pattern::from_kind(PatternKind::Guard { guard, into }),
            Step::Quantify(quantifier) => {
                Pattern::from_kind(PatternKind::Quantify { quantifier, into })
            }
            Step::Bind(variable) => Pattern::from(variable).and(into),
        }
    }
}

impl From<Step> for Pattern {
    fn from(step: Step) -> Self {
        step.then(Pattern::anything())
    }
}

impl From<&Variable> for Step {
    fn from(variable: &Variable) -> Self {
        Step::bind(variable)
    }
}

#[cfg(test)]
mod tests;
