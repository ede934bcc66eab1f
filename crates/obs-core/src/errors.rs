//! Structured error types shared across the observable crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`ObsError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (type names, arities, paths).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the observable crates.
///
/// A failed assertion is never an error: it is reported to a failure sink as
/// a message. These variants cover programmer errors and I/O around the
/// reporting layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum ObsError {
    /// A value of unsupported shape was handed to the negation operator.
    #[error("contract violation: {0}")]
    Contract(ErrorInfo),
    /// A dynamically invoked function received arguments or produced
    /// returns that disagree with its declared signature.
    #[error("signature error: {0}")]
    Signature(ErrorInfo),
    /// A regular expression failed to compile.
    #[error("pattern error: {0}")]
    Pattern(ErrorInfo),
    /// Reporting policy could not be read or parsed.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization of reports failed.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl ObsError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            ObsError::Contract(info)
            | ObsError::Signature(info)
            | ObsError::Pattern(info)
            | ObsError::Config(info)
            | ObsError::Serde(info) => info,
        }
    }

    /// Returns whether the error is a contract violation.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, ObsError::Contract(_))
    }
}
