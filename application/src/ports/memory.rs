//! Long-term memory port
//!
//! Vector memory used by the router: `embed` indexes text, `recall` returns
//! snippets relevant to a query.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Memory unavailable: {0}")]
    Unavailable(String),

    #[error("Embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("Recall failed: {0}")]
    RecallFailed(String),
}

#[async_trait]
pub trait MemoryPort: Send + Sync {
    /// Index `text` and return its embedding
    async fn embed(&self, text: &str) -> Result<Vec<f32>, MemoryError>;

    /// Snippets relevant to `query`, most relevant first
    async fn recall(&self, query: &str) -> Result<Vec<String>, MemoryError>;
}
