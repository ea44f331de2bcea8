//! Pattern trees.
//!
//! A [`Pattern`] is a cheap-clone handle to an immutable [`PatternKind`]
//! node. Trees are built once, bottom-up, and may be shared and reused across
//! any number of matches; only variable slots change during a match.

use std::fmt;
use std::mem;
use std::rc::Rc;

use dive_value::Value;

use crate::stack::ensure_sufficient_stack;
use crate::step::{Extractor, Guard, Quantifier};
use crate::variable::Variable;

/// Shared handle to a pattern node.
#[derive(Clone)]
pub struct Pattern(Rc<PatternKind>);

/// The closed set of pattern nodes.
pub enum PatternKind {
    /// Matches any value.
    Anything,
    /// Matches no value.
    Nothing,
    /// Matches values equal to the constant.
    Constant(Value),
    /// Binds on first use, compares while bound.
    Variable(Variable),
    /// Both sub-patterns, left to right; the right side runs inside the
    /// left side's bindings.
    And(Pattern, Pattern),
    /// The left sub-pattern, or else the right one.
    Or(Pattern, Pattern),
    /// Derive a value and match `into` against it.
    Extract { extractor: Extractor, into: Pattern },
    /// Match `into` against the unchanged value if the guard admits it.
    Guard { guard: Guard, into: Pattern },
    /// Apply `into` across a collection's elements.
    Quantify {
        quantifier: Quantifier,
        into: Pattern,
    },
}

impl Pattern {
    #[inline]
    pub(crate) fn from_kind(kind: PatternKind) -> Self {
        Pattern(Rc::new(kind))
    }

    #[inline]
    pub fn kind(&self) -> &PatternKind {
        &self.0
    }

    /// Whether both handles refer to the same node.
    ///
    /// Failure continuations receive the exact failing node, so this is how
    /// callers tell which sub-pattern failed.
    #[inline]
    pub fn ptr_eq(&self, other: &Pattern) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn anything() -> Self {
        Pattern::from_kind(PatternKind::Anything)
    }

    pub fn nothing() -> Self {
        Pattern::from_kind(PatternKind::Nothing)
    }

    pub fn constant(value: impl Into<Value>) -> Self {
        Pattern::from_kind(PatternKind::Constant(value.into()))
    }

    /// Conjunction: `other` is only tried once `self` has succeeded.
    #[must_use]
    pub fn and(self, other: impl Into<Pattern>) -> Self {
        Pattern::from_kind(PatternKind::And(self, other.into()))
    }

    /// Disjunction: `other` is only tried if `self` fails.
    #[must_use]
    pub fn or(self, other: impl Into<Pattern>) -> Self {
        Pattern::from_kind(PatternKind::Or(self, other.into()))
    }
}

impl PatternKind {
    fn has_children(&self) -> bool {
        !matches!(
            self,
            PatternKind::Anything
                | PatternKind::Nothing
                | PatternKind::Constant(_)
                | PatternKind::Variable(_)
        )
    }

    fn into_children(self) -> impl Iterator<Item = Pattern> {
        let (first, second) = match self {
            PatternKind::And(first, second) | PatternKind::Or(first, second) => {
                (Some(first), Some(second))
            }
            PatternKind::Extract { into, .. }
            | PatternKind::Guard { into, .. }
            | PatternKind::Quantify { into, .. } => (Some(into), None),
            PatternKind::Anything
            | PatternKind::Nothing
            | PatternKind::Constant(_)
            | PatternKind::Variable(_) => (None, None),
        };
        first.into_iter().chain(second)
    }
}

/// Drops uniquely owned subtrees from a worklist, so tearing down a deep
/// chain does not recurse once per level.
impl Drop for Pattern {
    fn drop(&mut self) {
        let Some(kind) = detach(&mut self.0) else {
            return;
        };
        let mut pending = vec![kind];
        while let Some(kind) = pending.pop() {
            for mut child in kind.into_children() {
                pending.extend(detach(&mut child.0));
            }
        }
    }
}

/// Take a node with children out of its `Rc` if this is the last handle,
/// leaving a leaf behind.
fn detach(node: &mut Rc<PatternKind>) -> Option<PatternKind> {
    let kind = Rc::get_mut(node)?;
    if !kind.has_children() {
        return None;
    }
    Some(mem::replace(kind, PatternKind::Anything))
}

impl From<Variable> for Pattern {
    fn from(variable: Variable) -> Self {
        Pattern::from_kind(PatternKind::Variable(variable))
    }
}

impl From<&Variable> for Pattern {
    fn from(variable: &Variable) -> Self {
        Pattern::from(variable.clone())
    }
}

impl From<&Pattern> for Pattern {
    fn from(pattern: &Pattern) -> Self {
        pattern.clone()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self.kind() {
            PatternKind::Anything => write!(f, "anything"),
            PatternKind::Nothing => write!(f, "nothing"),
            PatternKind::Constant(value) => write!(f, "={value}"),
            PatternKind::Variable(variable) => write!(f, "{variable}"),
            PatternKind::And(first, second) => write!(f, "({first} & {second})"),
            PatternKind::Or(first, second) => write!(f, "({first} | {second})"),
            PatternKind::Extract { extractor, into } => write_step(f, extractor, into),
            PatternKind::Guard { guard, into } => write_step(f, guard, into),
            PatternKind::Quantify { quantifier, into } => write_step(f, quantifier, into),
        })
    }
}

/// `step -> into`, eliding a trailing `anything`.
fn write_step(f: &mut fmt::Formatter<'_>, step: &dyn fmt::Display, into: &Pattern) -> fmt::Result {
    match into.kind() {
        PatternKind::Anything => write!(f, "{step}"),
        _ => write!(f, "{step} -> {into}"),
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({self})")
    }
}
