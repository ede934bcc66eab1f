use std::fmt;
use std::sync::Arc;

use crate::predicate::Predicate;

/// Zero-argument function returning a boolean, evaluated lazily.
pub type BoolFn = Arc<dyn Fn() -> bool + Send + Sync>;

/// Tagged form of an [`Assertion`].
#[derive(Clone)]
pub enum AssertionValue {
    /// Pre-computed truth value.
    Bool(bool),
    /// Zero-argument function evaluated when the assertion is checked.
    Lazy(BoolFn),
    /// Predicate carrying its own explanation.
    Predicate(Predicate),
}

impl fmt::Debug for AssertionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssertionValue::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            AssertionValue::Lazy(_) => f.write_str("Lazy(..)"),
            AssertionValue::Predicate(p) => f.debug_tuple("Predicate").field(p).finish(),
        }
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for bool {}
    impl Sealed for super::BoolFn {}
    impl Sealed for super::Predicate {}
}

/// Shapes accepted by the assertion adapter: `bool`, [`BoolFn`] and
/// [`Predicate`].
///
/// The trait is sealed, so any other type is rejected at compile time.
pub trait Assertion: sealed::Sealed + Send + Sync + 'static {
    /// Converts the assertion into its tagged form without evaluating it.
    fn into_value(self) -> AssertionValue;
}

impl Assertion for bool {
    fn into_value(self) -> AssertionValue {
        AssertionValue::Bool(self)
    }
}

impl Assertion for BoolFn {
    fn into_value(self) -> AssertionValue {
        AssertionValue::Lazy(self)
    }
}

impl Assertion for Predicate {
    fn into_value(self) -> AssertionValue {
        AssertionValue::Predicate(self)
    }
}
