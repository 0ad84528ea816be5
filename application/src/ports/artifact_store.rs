//! Artifact store port
//!
//! Persists artifacts produced by specialist agents.

use async_trait::async_trait;
use conclave_domain::Artifact;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Artifact rejected: {0}")]
    Rejected(String),
}

/// Port for artifact persistence
///
/// `save` must be idempotent for a given artifact id: saving the same
/// artifact twice returns the same path and stores one copy.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist `artifact` and return the path it was stored under
    async fn save(&self, artifact: &Artifact) -> Result<String, StoreError>;
}
