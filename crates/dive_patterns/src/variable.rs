//! Binding variables.
//!
//! A [`Variable`] is a placeholder that captures the value it is first
//! matched against and, while that binding is live, only matches equal
//! values. Bindings are scoped to the success continuation that followed
//! them: [`BindingGuard`] restores the unbound state when the continuation
//! returns, whether it returned normally, with a fault, or by unwinding.
//!
//! Identity comes from a [`VarSupply`] owned by the caller; the id is only
//! used for display. Two handles are the same variable iff they were cloned
//! from one another (see [`Variable::same`]).

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use dive_value::Value;

/// Display identity of a variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(u64);

impl VarId {
    #[inline]
    pub fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allocator for variable ids.
///
/// Ids increase monotonically per supply. Pattern builders that want
/// readable failure reports share one supply across a pattern tree.
#[derive(Debug, Default)]
pub struct VarSupply {
    next: u64,
}

impl VarSupply {
    pub fn new() -> Self {
        VarSupply::default()
    }

    /// Create a fresh, unbound variable.
    pub fn fresh(&mut self) -> Variable {
        let id = VarId(self.next);
        self.next = self.next.wrapping_add(1);
        Variable(Rc::new(Slot {
            id,
            bound: RefCell::new(None),
        }))
    }
}

struct Slot {
    id: VarId,
    bound: RefCell<Option<Value>>,
}

/// A binding placeholder. Clones share the same slot.
#[derive(Clone)]
pub struct Variable(Rc<Slot>);

impl Variable {
    #[inline]
    pub fn id(&self) -> VarId {
        self.0.id
    }

    pub fn is_bound(&self) -> bool {
        self.0.bound.borrow().is_some()
    }

    /// The currently bound value, if any.
    pub fn value(&self) -> Option<Value> {
        self.0.bound.borrow().clone()
    }

    /// Whether both handles refer to one variable.
    #[inline]
    pub fn same(&self, other: &Variable) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Compare `value` against the binding; `None` when unbound.
    pub(crate) fn bound_equals(&self, value: &Value) -> Option<bool> {
        self.0.bound.borrow().as_ref().map(|bound| bound == value)
    }

    /// Bind to `value` until the returned guard drops.
    ///
    /// Callers must check `bound_equals` first; the slot must be unbound.
    pub(crate) fn bind(&self, value: Value) -> BindingGuard<'_> {
        debug_assert!(!self.is_bound(), "variable {} bound twice", self.id());
        *self.0.bound.borrow_mut() = Some(value);
        BindingGuard { variable: self }
    }
}

/// Restores a variable to unbound on drop.
pub(crate) struct BindingGuard<'a> {
    variable: &'a Variable,
}

impl Drop for BindingGuard<'_> {
    fn drop(&mut self) {
        *self.variable.0.bound.borrow_mut() = None;
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0.bound.borrow() {
            Some(value) => write!(f, "?{} = {value}", self.id()),
            None => write!(f, "?{}", self.id()),
        }
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0.bound.borrow() {
            Some(value) => write!(f, "<Bound Variable {} = {value:?}>", self.id()),
            None => write!(f, "<Unbound Variable {}>", self.id()),
        }
    }
}
