use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;

use obs_core::errors::ObsError;
use tracing::{debug, warn};

use crate::policy::Policy;
use crate::report::{AssertionCheck, AssertionReport};
use crate::sink::FailureSink;

#[derive(Debug, Default)]
struct State {
    checks: Vec<AssertionCheck>,
    seen: usize,
    finished: bool,
}

/// Thread-safe [`FailureSink`] that collects soft failures for a test.
///
/// A reporter that recorded failures and is dropped without
/// [`finish`](Reporter::finish) panics, so soft failures still fail the
/// test (unless the policy disables it).
#[derive(Debug)]
pub struct Reporter {
    name: String,
    policy: Policy,
    state: Mutex<State>,
}

impl Reporter {
    /// Creates a reporter with the default policy.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_policy(name, Policy::default())
    }

    /// Creates a reporter with an explicit policy.
    pub fn with_policy(name: impl Into<String>, policy: Policy) -> Self {
        Self {
            name: name.into(),
            policy,
            state: Mutex::new(State::default()),
        }
    }

    /// Creates a reporter using the policy named by `OBS_POLICY`.
    pub fn from_env(name: impl Into<String>) -> Result<Self, ObsError> {
        Ok(Self::with_policy(name, Policy::from_env()?))
    }

    /// Returns the reporter's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the policy in force.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Returns the recorded failure messages, in order.
    pub fn failures(&self) -> Vec<String> {
        self.lock()
            .checks
            .iter()
            .filter(|check| !check.pass)
            .filter_map(|check| check.message.clone())
            .collect()
    }

    /// Returns whether any failure was recorded.
    pub fn failed(&self) -> bool {
        self.lock().checks.iter().any(|check| !check.pass)
    }

    /// Closes the reporter and returns its report. Dropping a finished
    /// reporter never panics.
    pub fn finish(&self) -> AssertionReport {
        let mut state = self.lock();
        state.finished = true;
        AssertionReport::new(self.name.clone(), state.checks.clone(), self.policy.clone())
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_failure(&self, message: &str) -> String {
        let message = self.policy.clip(message);
        let mut state = self.lock();
        let index = state.seen;
        state.seen += 1;
        state.checks.push(AssertionCheck {
            index,
            pass: false,
            message: Some(message.clone()),
        });
        debug!(reporter = %self.name, index, failure = %message, "assertion failed");
        message
    }
}

impl FailureSink for Reporter {
    fn error(&self, message: &str) {
        if self.policy.escalate {
            self.fail_now(message);
        }
        self.record_failure(message);
    }

    fn fail_now(&self, message: &str) -> ! {
        let message = self.record_failure(message);
        self.lock().finished = true;
        panic!("{}: {message}", self.name);
    }

    fn passed(&self) {
        let mut state = self.lock();
        let index = state.seen;
        state.seen += 1;
        if self.policy.record_passes {
            state.checks.push(AssertionCheck {
                index,
                pass: true,
                message: None,
            });
        }
    }
}

impl Drop for Reporter {
    fn drop(&mut self) {
        if thread::panicking() || !self.policy.panic_on_drop {
            return;
        }
        let state = self.lock();
        if state.finished {
            return;
        }
        let failures: Vec<&str> = state
            .checks
            .iter()
            .filter(|check| !check.pass)
            .filter_map(|check| check.message.as_deref())
            .collect();
        if failures.is_empty() {
            return;
        }
        warn!(reporter = %self.name, failures = failures.len(), "unfinished reporter dropped with failures");
        panic!("{}: {} assertion(s) failed:\n{}", self.name, failures.len(), failures.join("\n"));
    }
}
