use std::error::Error;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use obs_core::Predicate;
use tracing::debug;

use crate::shared::check;

type BoxError = Box<dyn Error + Send + Sync + 'static>;

// Walks `err` and its `source()` chain looking for a value equal to `target`.
fn chain_contains<E>(err: &(dyn Error + 'static), target: &E) -> bool
where
    E: Error + PartialEq + 'static,
{
    let mut current = Some(err);
    while let Some(err) = current {
        if err.downcast_ref::<E>() == Some(target) {
            return true;
        }
        current = err.source();
    }
    false
}

/// Holds when `err`, or any error in its source chain, equals `target`.
pub fn error_is<E>(err: impl Into<BoxError>, target: E) -> Predicate
where
    E: Error + PartialEq + Send + Sync + 'static,
{
    check(
        (err.into(), target),
        |(err, target)| chain_contains(&**err, target),
        |(err, target)| format!("expected error {err} to match {target}"),
    )
}

/// Holds when calling `f` returns `Err`.
///
/// `f` is called at most once, on the first `evaluate` or `describe`.
pub fn errors<T, E, F>(f: F) -> Predicate
where
    F: Fn() -> Result<T, E> + Send + Sync + 'static,
{
    Predicate::memoized(
        move || f().is_err(),
        |failed| *failed,
        |failed| {
            let got = if *failed { "Err" } else { "Ok" };
            format!("expected function to return an error, got {got}")
        },
    )
}

/// Holds when calling `f` returns an error whose chain contains `target`.
///
/// `f` is called at most once; the message names what it returned.
pub fn errors_with<T, E, F, Target>(f: F, target: Target) -> Predicate
where
    E: Error + 'static,
    F: Fn() -> Result<T, E> + Send + Sync + 'static,
    Target: Error + PartialEq + Send + Sync + 'static,
{
    let target = Arc::new(target);
    let for_msg = Arc::clone(&target);
    Predicate::memoized(
        move || match f() {
            Ok(_) => (false, "Ok".to_string()),
            Err(err) => (chain_contains(&err, &*target), format!("error {err}")),
        },
        |(matched, _)| *matched,
        move |(_, got)| format!("expected returned error to match {for_msg}, got {got}"),
    )
}

/// Holds when calling `f` panics.
///
/// `f` is called at most once. The panic is caught; the default panic hook
/// still prints it.
pub fn panics<F>(f: F) -> Predicate
where
    F: Fn() + Send + Sync + 'static,
{
    Predicate::memoized(
        move || {
            let panicked = panic::catch_unwind(AssertUnwindSafe(&f)).is_err();
            if panicked {
                debug!("checked function panicked");
            }
            panicked
        },
        |panicked| *panicked,
        |panicked| {
            let got = if *panicked { "it panicked" } else { "it returned normally" };
            format!("expected function to panic, {got}")
        },
    )
}
