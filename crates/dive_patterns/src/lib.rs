//! Dive Patterns - continuation-passing structural pattern matching.
//!
//! Patterns are small immutable trees that descend into a [`Value`]: pull
//! out fields and elements, check types and predicates, quantify over
//! collections, and bind [`Variable`]s along the way. A match does not
//! return a verdict; it calls a success continuation once per way the value
//! matches (with the bindings of that way live) and a failure continuation
//! naming the sub-pattern and value that did not match.
//!
//! # Example
//!
//! ```
//! use dive_patterns::{chain, Step, VarSupply};
//! use dive_value::Value;
//!
//! let mut vars = VarSupply::new();
//! let v = vars.fresh();
//! let pattern = chain([Step::some(), Step::when(|x| x.as_int() > Some(1))], &v);
//!
//! let seen = std::cell::RefCell::new(Vec::new());
//! let list = Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]);
//! pattern.unify_silently(&list, || {
//!     seen.borrow_mut().extend(v.value());
//!     Ok(())
//! })?;
//! assert_eq!(*seen.borrow(), vec![Value::int(2), Value::int(3)]);
//! # Ok::<(), dive_value::Fault>(())
//! ```
//!
//! # Modules
//!
//! - `pattern`: the closed pattern tree and its combinators
//! - `step`: open, chainable steps (extract, guard, quantify, bind)
//! - `variable`: binding variables and their id supply
//! - `unify`: the matching engine
//! - `compose`: free-function builders
//!
//! # Tracing
//!
//! The engine emits `trace!` events for bindings and quantifier outcomes and
//! a `debug!` event when an extractor fault escapes. Call [`init_tracing`]
//! and set `RUST_LOG` (e.g. `RUST_LOG=dive_patterns=trace`) to see them.

mod compose;
mod errors;
mod pattern;
mod stack;
mod step;
mod unify;
mod variable;

use std::sync::Once;

pub use compose::{and, anything, chain, constant, nothing, or, then};
pub use errors::{MatchError, UnifyResult};
pub use pattern::{Pattern, PatternKind};
pub use step::{ExtractFn, Extractor, Guard, PredicateFn, Quantifier, Step};
pub use variable::{VarId, VarSupply, Variable};

pub use dive_value::{Fault, TypeTag, Value};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, and only ever runs once per
/// process. A subscriber installed elsewhere takes precedence.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let installed = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
            if let Err(err) = installed {
                tracing::debug!(%err, "keeping the existing tracing subscriber");
            }
        }
    });
}
