use std::fmt::Debug;
use std::sync::Arc;

use obs_core::Predicate;

use crate::shared::check;

/// Holds when `value` is `None`.
pub fn none<T>(value: Option<T>) -> Predicate
where
    T: Debug + Send + Sync + 'static,
{
    check(
        value,
        |v| v.is_none(),
        |v| format!("expected {v:?} to be None"),
    )
}

/// Holds when `value` is `Some`.
pub fn some<T>(value: Option<T>) -> Predicate
where
    T: Debug + Send + Sync + 'static,
{
    check(
        value,
        |v| v.is_some(),
        |v| format!("expected a value, got {v:?}"),
    )
}

/// Holds when `value` equals `T::default()`.
pub fn zero<T>(value: T) -> Predicate
where
    T: Default + PartialEq + Debug + Send + Sync + 'static,
{
    check(
        value,
        |v| *v == T::default(),
        |v| format!("expected zero value, got {v:?}"),
    )
}

/// Holds when `got == want`.
pub fn equal<T>(got: T, want: T) -> Predicate
where
    T: PartialEq + Debug + Send + Sync + 'static,
{
    check(
        (got, want),
        |(got, want)| got == want,
        |(got, want)| format!("expected {want:?}, got {got:?}"),
    )
}

/// Holds when calling `f` yields `want`.
///
/// `f` is called at most once, on the first `evaluate` or `describe`.
pub fn returns<T, F>(f: F, want: T) -> Predicate
where
    T: PartialEq + Debug + Send + Sync + 'static,
    F: Fn() -> T + Send + Sync + 'static,
{
    let want = Arc::new(want);
    let for_msg = Arc::clone(&want);
    Predicate::memoized(
        f,
        move |got| *got == *want,
        move |got| format!("expected {for_msg:?}, got {got:?}"),
    )
}

/// Holds when `got` and `want` are structurally equal.
///
/// The comparison runs once; the message pretty-prints both sides.
pub fn deep_equal<T>(got: T, want: T) -> Predicate
where
    T: PartialEq + Debug + Send + Sync + 'static,
{
    let sides = Arc::new((got, want));
    let for_msg = Arc::clone(&sides);
    Predicate::memoized(
        move || sides.0 == sides.1,
        |matched| *matched,
        move |_| format!("expected {:#?}, got {:#?}", for_msg.1, for_msg.0),
    )
}
