use std::time::Duration;
use tracing::warn;

use crate::protocol::ProtocolRules;
use crate::shared::{env_or, AppError};

pub const SUBMIT_TIMEOUT_ENV: &str = "ROOMGATE_SUBMIT_TIMEOUT_SECS";
pub const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 30;

/// Configuration for submitting room access requests
#[derive(Debug, Clone)]
pub struct SubmitConfig {
    /// How long to wait for the gateway before giving up. `None` waits forever.
    pub timeout: Option<Duration>,
    pub rules: ProtocolRules,
}

impl SubmitConfig {
    /// Reads the timeout from the environment (0 disables it). A malformed
    /// value is logged and replaced by the default; use `from_env` to reject it.
    pub fn new() -> Self {
        let secs = env_or(SUBMIT_TIMEOUT_ENV, DEFAULT_SUBMIT_TIMEOUT_SECS).unwrap_or_else(|e| {
            warn!(
                error = %e,
                default = DEFAULT_SUBMIT_TIMEOUT_SECS,
                "Using default submit timeout"
            );
            DEFAULT_SUBMIT_TIMEOUT_SECS
        });

        Self {
            timeout: timeout_from_secs(secs),
            rules: ProtocolRules::default(),
        }
    }

    /// Like `new`, but rejects a malformed timeout instead of ignoring it
    pub fn from_env() -> Result<Self, AppError> {
        let secs = env_or(SUBMIT_TIMEOUT_ENV, DEFAULT_SUBMIT_TIMEOUT_SECS)?;
        Ok(Self {
            timeout: timeout_from_secs(secs),
            rules: ProtocolRules::default(),
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_rules(mut self, rules: ProtocolRules) -> Self {
        self.rules = rules;
        self
    }
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
