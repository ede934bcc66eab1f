//! Entry points that check an [`Assertion`] and report to a [`FailureSink`].

use std::fmt;

use obs_core::{Assertion, AssertionValue};
use tracing::debug;

use crate::sink::FailureSink;

const DEFAULT_FAILURE: &str = "assertion failed";

/// Reduces an assertion to its outcome and automatic message.
///
/// Booleans and nullary functions carry no message; a nullary function is
/// invoked exactly once. Predicates contribute their description.
pub fn normalize<A: Assertion>(assertion: A) -> (bool, String) {
    match assertion.into_value() {
        AssertionValue::Bool(ok) => (ok, String::new()),
        AssertionValue::Lazy(f) => (f(), String::new()),
        AssertionValue::Predicate(p) => (p.evaluate(), p.describe().to_string()),
    }
}

fn observe<S: FailureSink + ?Sized>(sink: &S, ok: bool, message: &str) -> bool {
    if ok {
        sink.passed();
        return true;
    }
    let message = if message.is_empty() {
        DEFAULT_FAILURE
    } else {
        message
    };
    debug!(failure = message, "reporting failed assertion");
    sink.error(message);
    false
}

/// Checks `assertion`, recording a soft failure with its automatic message.
///
/// Returns the outcome so callers can branch on it.
pub fn assert<S, A>(sink: &S, assertion: A) -> bool
where
    S: FailureSink + ?Sized,
    A: Assertion,
{
    let (ok, message) = normalize(assertion);
    observe(sink, ok, &message)
}

/// Like [`assert`] but reports `message` instead of the automatic one.
///
/// The message is only formatted when the assertion fails.
pub fn assertf<S, A>(sink: &S, assertion: A, message: fmt::Arguments<'_>) -> bool
where
    S: FailureSink + ?Sized,
    A: Assertion,
{
    let (ok, _) = normalize(assertion);
    if ok {
        return observe(sink, true, "");
    }
    observe(sink, false, &message.to_string())
}

/// Checks `assertion` and stops the test through
/// [`FailureSink::fail_now`] when it fails.
pub fn require<S, A>(sink: &S, assertion: A)
where
    S: FailureSink + ?Sized,
    A: Assertion,
{
    let (ok, message) = normalize(assertion);
    if ok {
        sink.passed();
        return;
    }
    let message = if message.is_empty() {
        DEFAULT_FAILURE.to_string()
    } else {
        message
    };
    sink.fail_now(&message)
}

/// Checks an assertion with a formatted failure message.
///
/// ```ignore
/// assertf!(&reporter, predicate, "lookup of {key} failed");
/// ```
#[macro_export]
macro_rules! assertf {
    ($sink:expr, $assertion:expr, $($arg:tt)+) => {
        $crate::assertf($sink, $assertion, ::std::format_args!($($arg)+))
    };
}
