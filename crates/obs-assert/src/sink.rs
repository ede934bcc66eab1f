//! Destinations for assertion failures.

/// Something that records failed assertions.
///
/// `error` is the soft variant: the failure is recorded and execution
/// continues. `fail_now` records the failure and unwinds immediately.
pub trait FailureSink {
    /// Records a failure and lets the caller continue.
    fn error(&self, message: &str);

    /// Records a failure and stops the current test.
    fn fail_now(&self, message: &str) -> !;

    /// Called for every passing assertion.
    fn passed(&self) {}
}

impl<S: FailureSink + ?Sized> FailureSink for &S {
    fn error(&self, message: &str) {
        (**self).error(message)
    }

    fn fail_now(&self, message: &str) -> ! {
        (**self).fail_now(message)
    }

    fn passed(&self) {
        (**self).passed()
    }
}

/// Sink that turns every failure into a panic, like `assert!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicSink;

impl FailureSink for PanicSink {
    fn error(&self, message: &str) {
        panic!("assertion failed: {message}");
    }

    fn fail_now(&self, message: &str) -> ! {
        panic!("assertion failed: {message}");
    }
}
