//! Reasoning provider port
//!
//! Defines the interface every reasoning backend (local model server, cloud
//! API, scripted double) implements. Council members and specialist agents
//! are both driven through this one trait.

use async_trait::async_trait;
use conclave_domain::{ContextMessage, PromptTemplate};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while asking a provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Empty response from {0}")]
    EmptyResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl ProviderError {
    /// Whether retrying the same request might succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderError::RequestFailed(_) | ProviderError::Timeout | ProviderError::Unavailable(_)
        )
    }
}

/// Per-request options
#[derive(Debug, Clone, Default)]
pub struct AskOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Prior conversation turns, oldest first
    pub history: Vec<ContextMessage>,
}

impl AskOptions {
    pub fn with_history(mut self, history: Vec<ContextMessage>) -> Self {
        self.history = history;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// A reasoning backend
///
/// Only [`ask`](ReasoningProvider::ask) is required. The debate methods
/// default to `ask` with the council prompt templates and the member's
/// own system prompt.
#[async_trait]
pub trait ReasoningProvider: Send + Sync {
    /// Display name, used in minutes and ballots
    fn name(&self) -> &str;

    /// Perspective this provider argues from in a council
    fn role(&self) -> &str;

    /// Backend model identifier
    fn model_id(&self) -> &str;

    /// Liveness check; remote backends are assumed live.
    async fn is_available(&self) -> bool {
        true
    }

    /// Send one prompt under `system` and return the full response text
    async fn ask(
        &self,
        prompt: &str,
        system: &str,
        options: &AskOptions,
    ) -> Result<String, ProviderError>;

    async fn contemplate(&self, topic: &str) -> Result<String, ProviderError> {
        let system = PromptTemplate::councilor_system(self.name(), self.role());
        self.ask(&PromptTemplate::contemplate(topic), &system, &AskOptions::default())
            .await
    }

    async fn critique(&self, position: &str, author: &str) -> Result<String, ProviderError> {
        let system = PromptTemplate::councilor_system(self.name(), self.role());
        self.ask(
            &PromptTemplate::critique(position, author),
            &system,
            &AskOptions::default(),
        )
        .await
    }

    async fn vote(&self, context: &str) -> Result<String, ProviderError> {
        let system = PromptTemplate::councilor_system(self.name(), self.role());
        self.ask(&PromptTemplate::vote(context), &system, &AskOptions::default())
            .await
    }
}

/// Shared handle to a provider with reference identity.
///
/// Two `Councilor`s are equal only when they point at the same provider
/// instance; equal names do not make equal members.
#[derive(Clone)]
pub struct Councilor(Arc<dyn ReasoningProvider>);

impl Councilor {
    pub fn new(provider: Arc<dyn ReasoningProvider>) -> Self {
        Self(provider)
    }

    pub fn provider(&self) -> Arc<dyn ReasoningProvider> {
        Arc::clone(&self.0)
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    fn address(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for Councilor {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.address(), other.address())
    }
}

impl Eq for Councilor {}

impl Hash for Councilor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl fmt::Debug for Councilor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Councilor")
            .field("name", &self.0.name())
            .field("model", &self.0.model_id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder {
        name: String,
        prompts: Mutex<Vec<(String, String)>>,
    }

    impl Recorder {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ReasoningProvider for Recorder {
        fn name(&self) -> &str {
            &self.name
        }

        fn role(&self) -> &str {
            "skeptic"
        }

        fn model_id(&self) -> &str {
            "recorder-1"
        }

        async fn ask(
            &self,
            prompt: &str,
            system: &str,
            _options: &AskOptions,
        ) -> Result<String, ProviderError> {
            self.prompts
                .lock()
                .unwrap()
                .push((prompt.to_string(), system.to_string()));
            Ok("ok".to_string())
        }
    }

    #[tokio::test]
    async fn test_debate_methods_route_through_ask() {
        let provider = Recorder::new("Skeptic");
        provider.contemplate("Is AI dangerous?").await.unwrap();
        provider.critique("AI is fine.", "Optimist").await.unwrap();
        provider.vote("Topic: Is AI dangerous?").await.unwrap();

        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[0].0.contains("Is AI dangerous?"));
        assert!(prompts[1].0.contains("--- Optimist ---"));
        assert!(prompts[2].0.starts_with("Topic: Is AI dangerous?"));
        assert!(prompts.iter().all(|(_, system)| system.contains("Skeptic")));
        assert!(prompts.iter().all(|(_, system)| system.contains("skeptic")));
    }

    #[test]
    fn test_councilor_identity_is_by_reference() {
        let a: Arc<dyn ReasoningProvider> = Arc::new(Recorder::new("Twin"));
        let b: Arc<dyn ReasoningProvider> = Arc::new(Recorder::new("Twin"));

        assert_eq!(Councilor::new(Arc::clone(&a)), Councilor::new(Arc::clone(&a)));
        assert_ne!(Councilor::new(a), Councilor::new(b));
    }

    #[test]
    fn test_transient_errors() {
        assert!(ProviderError::Timeout.is_transient());
        assert!(ProviderError::RequestFailed("503".to_string()).is_transient());
        assert!(!ProviderError::EmptyResponse("x".to_string()).is_transient());
    }
}
