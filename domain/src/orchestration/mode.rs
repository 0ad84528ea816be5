//! Reasoning backend selection for plain queries.
//!
//! [`ReasoningMode`] decides which backend answers a query that is not a
//! master directive:
//!
//! - Local: the local model server, with a labeled fallback to cloud when it
//!   is not live
//! - Cloud: the remote API backend
//! - Hybrid: short prompts go local (when live), long prompts go to cloud

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prompts shorter than this many characters stay local in Hybrid mode.
pub const DEFAULT_HYBRID_THRESHOLD: usize = 280;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningMode {
    Local,
    #[default]
    Cloud,
    Hybrid,
}

/// Which backend a prompt should go to before liveness is considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Local,
    Cloud,
}

impl ReasoningMode {
    /// Preferred backend for `prompt` under this mode.
    pub fn preferred_backend(&self, prompt: &str, hybrid_threshold: usize) -> Backend {
        match self {
            ReasoningMode::Local => Backend::Local,
            ReasoningMode::Cloud => Backend::Cloud,
            ReasoningMode::Hybrid => {
                if prompt.chars().count() < hybrid_threshold {
                    Backend::Local
                } else {
                    Backend::Cloud
                }
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningMode::Local => "local",
            ReasoningMode::Cloud => "cloud",
            ReasoningMode::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for ReasoningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReasoningMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "l" => Ok(ReasoningMode::Local),
            "cloud" | "remote" | "c" => Ok(ReasoningMode::Cloud),
            "hybrid" | "h" => Ok(ReasoningMode::Hybrid),
            _ => Err(DomainError::InvalidMode(s.to_string())),
        }
    }
}
