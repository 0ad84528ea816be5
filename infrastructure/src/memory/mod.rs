//! [`MemoryPort`](conclave_application::MemoryPort) adapters.

use async_trait::async_trait;
use conclave_application::{MemoryError, MemoryPort};

/// Memory that remembers nothing.
///
/// Recall always returns no snippets; embedding reports the memory as
/// unavailable so that callers asking to remember learn it did not happen.
pub struct NullMemory;

#[async_trait]
impl MemoryPort for NullMemory {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, MemoryError> {
        Err(MemoryError::Unavailable(
            "no long-term memory backend configured".to_string(),
        ))
    }

    async fn recall(&self, _query: &str) -> Result<Vec<String>, MemoryError> {
        Ok(Vec::new())
    }
}
