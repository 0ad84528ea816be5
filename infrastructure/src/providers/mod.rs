//! [`ReasoningProvider`](conclave_application::ReasoningProvider) adapters.

mod scripted;

pub use scripted::ScriptedProvider;

use serde::{Deserialize, Serialize};

/// Where a backend runs. Only local backends report liveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Local,
    Remote,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Local => write!(f, "local"),
            ProviderKind::Remote => write!(f, "remote"),
        }
    }
}
