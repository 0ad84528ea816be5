//! Test doubles shared by the use case tests.

use crate::ports::artifact_store::{ArtifactStore, StoreError};
use crate::ports::memory::{MemoryError, MemoryPort};
use crate::ports::reasoning_provider::{AskOptions, ProviderError, ReasoningProvider};
use async_trait::async_trait;
use conclave_domain::Artifact;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// One `ask` call as the provider saw it
#[derive(Debug, Clone)]
pub struct AskRecord {
    pub prompt: String,
    pub system: String,
    pub history_len: usize,
}

/// Provider that replays queued responses in order.
pub struct QueueProvider {
    name: String,
    available: AtomicBool,
    responses: Mutex<VecDeque<Result<String, ProviderError>>>,
    asks: Mutex<Vec<AskRecord>>,
}

impl QueueProvider {
    pub fn new(name: &str, responses: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            name: name.to_string(),
            available: AtomicBool::new(true),
            responses: Mutex::new(VecDeque::from(responses)),
            asks: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(name: &str, replies: &[&str]) -> Self {
        Self::new(name, replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn asks(&self) -> Vec<AskRecord> {
        self.asks.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.asks.lock().unwrap().len()
    }
}

#[async_trait]
impl ReasoningProvider for QueueProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> &str {
        "generalist"
    }

    fn model_id(&self) -> &str {
        "queue-model"
    }

    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn ask(
        &self,
        prompt: &str,
        system: &str,
        options: &AskOptions,
    ) -> Result<String, ProviderError> {
        self.asks.lock().unwrap().push(AskRecord {
            prompt: prompt.to_string(),
            system: system.to_string(),
            history_len: options.history.len(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::Other("No more responses".to_string())))
    }
}

/// Store that keeps artifacts in a map keyed by id.
#[derive(Default)]
pub struct MemoryStore {
    saved: Mutex<HashMap<String, Artifact>>,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.saved.lock().unwrap().len()
    }
}

#[async_trait]
impl ArtifactStore for MemoryStore {
    async fn save(&self, artifact: &Artifact) -> Result<String, StoreError> {
        self.saved
            .lock()
            .unwrap()
            .insert(artifact.id.clone(), artifact.clone());
        Ok(format!("mem://{}", artifact.id))
    }
}

/// Store that refuses everything.
pub struct BrokenStore;

#[async_trait]
impl ArtifactStore for BrokenStore {
    async fn save(&self, _artifact: &Artifact) -> Result<String, StoreError> {
        Err(StoreError::Io("disk full".to_string()))
    }
}

/// Memory with canned recall results and switchable failures.
pub struct StubMemory {
    pub recalled: Vec<String>,
    pub fail_recall: bool,
    pub fail_embed: bool,
    pub embedded: Mutex<Vec<String>>,
}

impl StubMemory {
    pub fn recalling(snippets: &[&str]) -> Self {
        Self {
            recalled: snippets.iter().map(|s| s.to_string()).collect(),
            fail_recall: false,
            fail_embed: false,
            embedded: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MemoryPort for StubMemory {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, MemoryError> {
        if self.fail_embed {
            return Err(MemoryError::EmbeddingFailed("vector store offline".to_string()));
        }
        self.embedded.lock().unwrap().push(text.to_string());
        Ok(vec![0.0; 4])
    }

    async fn recall(&self, _query: &str) -> Result<Vec<String>, MemoryError> {
        if self.fail_recall {
            return Err(MemoryError::RecallFailed("index corrupt".to_string()));
        }
        Ok(self.recalled.clone())
    }
}
