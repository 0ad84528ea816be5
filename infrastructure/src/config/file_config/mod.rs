//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Enum-like fields stay strings here and are parsed on conversion, so a bad
//! value becomes a [`ConfigIssue`] instead of a load failure.

mod context;
mod council;
mod retry;
mod router;

pub use context::FileContextConfig;
pub use council::{FileCouncilConfig, FileCouncilMember};
pub use retry::FileRetryConfig;
pub use router::FileRouterConfig;

use conclave_application::{CouncilParams, RetryPolicy, RouterParams};
use conclave_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Conversation window settings
    pub context: FileContextConfig,
    /// Backoff for specialist provider calls
    pub retry: FileRetryConfig,
    /// Default mode, persona and hybrid threshold
    pub router: FileRouterConfig,
    /// Quorum and member roster
    pub council: FileCouncilConfig,
}

impl FileConfig {
    /// Router parameters assembled from `[router]` and `[context]`.
    pub fn router_params(&self) -> (RouterParams, Vec<ConfigIssue>) {
        let (mode, mut issues) = self.router.parse_mode();
        let (persona, persona_issues) = self.router.parse_persona();
        let (token_budget, budget_issues) = self.context.parse_token_budget();
        issues.extend(persona_issues);
        issues.extend(budget_issues);

        let params = RouterParams::default()
            .with_mode(mode)
            .with_persona(persona)
            .with_hybrid_threshold(self.router.hybrid_threshold)
            .with_token_budget(token_budget);
        (params, issues)
    }

    pub fn retry_policy(&self) -> (RetryPolicy, Vec<ConfigIssue>) {
        self.retry.to_retry_policy()
    }

    pub fn council_params(&self) -> (CouncilParams, Vec<ConfigIssue>) {
        self.council.to_council_params()
    }

    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.router_params().1);
        issues.extend(self.retry_policy().1);
        issues.extend(self.council_params().1);
        issues
    }
}
