//! Retry configuration from TOML (`[retry]` section)

use conclave_application::RetryPolicy;
use conclave_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backoff for specialist provider calls.
///
/// # Example
///
/// ```toml
/// [retry]
/// max_attempts = 5
/// base_delay_ms = 250
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay after the first failure; doubles after each further failure
    pub base_delay_ms: u64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts(),
            base_delay_ms: policy.base_delay().as_millis() as u64,
        }
    }
}

impl FileRetryConfig {
    /// Convert to a [`RetryPolicy`], reporting values that had to be adjusted.
    pub fn to_retry_policy(&self) -> (RetryPolicy, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        if self.max_attempts == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidConstraint {
                    field: "retry.max_attempts".to_string(),
                },
                "retry.max_attempts must be at least 1, using 1",
            ));
        }
        let policy = RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms));
        (policy, issues)
    }
}
