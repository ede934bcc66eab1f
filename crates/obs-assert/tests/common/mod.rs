#![allow(dead_code)]

use std::sync::Mutex;

use obs_assert::{assert, FailureSink};
use obs_core::Assertion;

/// Sink that remembers whether, and with what, a failure was reported.
#[derive(Default)]
pub struct Spy {
    failures: Mutex<Vec<String>>,
    passes: Mutex<usize>,
}

impl Spy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spied_on_failure(&self) -> bool {
        !self.failures.lock().unwrap().is_empty()
    }

    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().unwrap().clone()
    }

    pub fn passes(&self) -> usize {
        *self.passes.lock().unwrap()
    }
}

impl FailureSink for Spy {
    fn error(&self, message: &str) {
        self.failures.lock().unwrap().push(message.to_string());
    }

    fn fail_now(&self, message: &str) -> ! {
        self.failures.lock().unwrap().push(message.to_string());
        panic!("fail_now: {message}");
    }

    fn passed(&self) {
        *self.passes.lock().unwrap() += 1;
    }
}

/// Asserts that `assertion` passes when checked against a fresh spy.
#[track_caller]
pub fn expect_pass<A: Assertion>(assertion: A) {
    let spy = Spy::new();
    let ok = assert(&spy, assertion);
    assert!(
        ok && !spy.spied_on_failure(),
        "expected pass, got failures {:?}",
        spy.failures()
    );
}

/// Asserts that `assertion` fails when checked against a fresh spy.
#[track_caller]
pub fn expect_fail<A: Assertion>(assertion: A) {
    let spy = Spy::new();
    let ok = assert(&spy, assertion);
    assert!(!ok && spy.spied_on_failure(), "expected failure");
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
