use std::env;
use std::fs;
use std::path::Path;

use obs_core::errors::{ErrorInfo, ObsError};
use serde::{Deserialize, Serialize};

/// Environment variable naming a TOML policy file.
pub const POLICY_ENV: &str = "OBS_POLICY";

const TRUNCATION_SUFFIX: &str = "...";

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Policy controlling how a [`Reporter`](crate::Reporter) treats failures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Policy {
    /// Escalate every soft failure to an immediate hard failure.
    #[serde(default)]
    pub escalate: bool,
    /// Panic when a reporter holding unfinished failures is dropped.
    #[serde(default = "Policy::default_panic_on_drop")]
    pub panic_on_drop: bool,
    /// Keep passing checks in the report, not just failures.
    #[serde(default = "Policy::default_record_passes")]
    pub record_passes: bool,
    /// Maximum length of a recorded failure message in bytes (0 disables the limit).
    #[serde(default = "Policy::default_max_message_len")]
    pub max_message_len: usize,
}

impl Policy {
    const fn default_panic_on_drop() -> bool {
        true
    }

    const fn default_record_passes() -> bool {
        true
    }

    const fn default_max_message_len() -> usize {
        4096
    }

    /// Parses a policy from TOML; absent keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ObsError> {
        toml::from_str(contents).map_err(|err| {
            ObsError::Config(ErrorInfo::new("obs_assert.parse_policy", err.to_string()))
        })
    }

    /// Reads a TOML policy file.
    pub fn load(path: &Path) -> Result<Self, ObsError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            ObsError::Config(
                ErrorInfo::new(
                    "obs_assert.read_policy",
                    format!("failed to read policy: {err}"),
                )
                .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_toml_str(&contents).map_err(|err| match err {
            ObsError::Config(info) => {
                ObsError::Config(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Loads the file named by [`POLICY_ENV`], or the defaults when unset.
    pub fn from_env() -> Result<Self, ObsError> {
        match env::var_os(POLICY_ENV) {
            Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    /// Truncates `message` to at most the configured limit, on a char boundary.
    ///
    /// The `...` marker is appended only when the limit leaves room for it.
    pub fn clip(&self, message: &str) -> String {
        if self.max_message_len == 0 || message.len() <= self.max_message_len {
            return message.to_string();
        }
        if self.max_message_len <= TRUNCATION_SUFFIX.len() {
            return message[..floor_char_boundary(message, self.max_message_len)].to_string();
        }
        let end = floor_char_boundary(message, self.max_message_len - TRUNCATION_SUFFIX.len());
        format!("{}{TRUNCATION_SUFFIX}", &message[..end])
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            escalate: false,
            panic_on_drop: Self::default_panic_on_drop(),
            record_passes: Self::default_record_passes(),
            max_message_len: Self::default_max_message_len(),
        }
    }
}
