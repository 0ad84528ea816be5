//! Conversation window configuration from TOML (`[context]` section)

use conclave_domain::{ConfigIssue, ConfigIssueCode, DEFAULT_TOKEN_BUDGET};
use serde::{Deserialize, Serialize};

/// Conversation window configuration from TOML.
///
/// # Example
///
/// ```toml
/// [context]
/// token_budget = 8000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileContextConfig {
    /// Estimated-token budget of the sliding window
    pub token_budget: usize,
}

impl Default for FileContextConfig {
    fn default() -> Self {
        Self {
            token_budget: DEFAULT_TOKEN_BUDGET,
        }
    }
}

impl FileContextConfig {
    /// Token budget, falling back to the default when it is zero.
    pub fn parse_token_budget(&self) -> (usize, Vec<ConfigIssue>) {
        if self.token_budget > 0 {
            return (self.token_budget, vec![]);
        }
        let issue = ConfigIssue::warning(
            ConfigIssueCode::InvalidConstraint {
                field: "context.token_budget".to_string(),
            },
            format!(
                "context.token_budget must be positive, using {}",
                DEFAULT_TOKEN_BUDGET
            ),
        );
        (DEFAULT_TOKEN_BUDGET, vec![issue])
    }
}
