//! One-shot shared computation cell.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

/// Outcome of a cached computation: its value, or the message it panicked with.
pub(crate) type Settled<T> = Result<T, String>;

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "memoised computation panicked".to_string()
}

/// Returns the value cached in `cell`, running `compute` on first access.
///
/// A panicking `compute` still counts as the single run: the panic message
/// is cached and every access, the first included, unwinds with it.
pub(crate) fn settle<T, F>(cell: &OnceLock<Settled<T>>, compute: F) -> &T
where
    F: FnOnce() -> T,
{
    let outcome = cell.get_or_init(|| {
        panic::catch_unwind(AssertUnwindSafe(compute)).map_err(|payload| panic_message(&*payload))
    });
    match outcome {
        Ok(value) => value,
        Err(message) => panic::resume_unwind(Box::new(message.clone())),
    }
}

/// Deferred computation that runs at most once across every clone of the
/// handle, including under concurrent first access. A computation that
/// panics is not retried; later accesses panic with the same message.
///
/// Predicates hand one clone to their evaluation thunk and another to their
/// message thunk, so an expensive comparison is performed once in total no
/// matter which thunk is touched first.
pub struct Memo<T> {
    cell: Arc<OnceLock<Settled<T>>>,
    compute: Arc<dyn Fn() -> T + Send + Sync>,
}

impl<T> Memo<T> {
    /// Wraps `compute` without running it.
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            cell: Arc::new(OnceLock::new()),
            compute: Arc::new(compute),
        }
    }

    /// Returns the cached value, computing it on first access.
    pub fn get(&self) -> &T {
        settle(&self.cell, || (self.compute)())
    }

    /// Returns whether the computation has already run.
    pub fn is_resolved(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> Clone for Memo<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
            compute: Arc::clone(&self.compute),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memo")
            .field("outcome", &self.cell.get())
            .finish_non_exhaustive()
    }
}
