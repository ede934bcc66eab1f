use obs_core::errors::{ErrorInfo, ObsError};
use serde::{Deserialize, Serialize};

use crate::policy::Policy;

fn report_error(code: &str, message: impl Into<String>) -> ObsError {
    ObsError::Serde(ErrorInfo::new(code, message.into()))
}

/// Outcome of a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssertionCheck {
    /// Position of the assertion within its reporter.
    pub index: usize,
    /// Whether the assertion passed.
    pub pass: bool,
    /// Failure message, absent for passing checks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Aggregated outcome of every assertion seen by a reporter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssertionReport {
    /// Name of the test or scope that produced the report.
    pub name: String,
    /// Recorded checks, in order.
    pub checks: Vec<AssertionCheck>,
    /// Number of failed checks.
    pub failures: usize,
    /// Policy in force while the checks ran.
    pub policy: Policy,
}

impl AssertionReport {
    /// Builds a report, counting failures from `checks`.
    pub fn new(name: impl Into<String>, checks: Vec<AssertionCheck>, policy: Policy) -> Self {
        let failures = checks.iter().filter(|check| !check.pass).count();
        Self {
            name: name.into(),
            checks,
            failures,
            policy,
        }
    }

    /// Returns whether every recorded check passed.
    pub fn passed(&self) -> bool {
        self.failures == 0
    }

    /// Returns the failure messages, in order.
    pub fn failure_messages(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|check| !check.pass)
            .filter_map(|check| check.message.as_deref())
            .collect()
    }

    /// Serializes the report as pretty JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, ObsError> {
        serde_json::to_vec_pretty(self)
            .map_err(|err| report_error("obs_assert.encode_report", err.to_string()))
    }

    /// Decodes a report previously produced by [`to_json_bytes`](Self::to_json_bytes).
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ObsError> {
        serde_json::from_slice(bytes)
            .map_err(|err| report_error("obs_assert.decode_report", err.to_string()))
    }
}
