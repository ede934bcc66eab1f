#![deny(missing_docs)]
#![doc = "Predicate core for the observable assertion library: lazy, memoised checks and their combinators."]

/// The closed union of assertion shapes.
pub mod assertion;
/// Logical combinators (`any`, `all`).
pub mod combinators;
pub mod errors;
pub mod memo;
pub mod predicate;

pub use assertion::{Assertion, AssertionValue, BoolFn};
pub use combinators::{all, any};
pub use errors::{ErrorInfo, ObsError};
pub use memo::Memo;
pub use predicate::{Predicate, NEGATION_MARKER};
