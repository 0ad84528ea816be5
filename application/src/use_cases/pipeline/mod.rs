//! Specialist pipeline
//!
//! Master directives are handled by a small set of specialists, each a
//! [`SpecialistAgent`]:
//!
//! | Specialist | Handles | Produces |
//! |------------|---------|----------|
//! | [`Architect`] | genesis / ascension | audit & plan artifact |
//! | [`PipelineCoordinator`] | everything else, routed by [`DirectiveKind`] | swarm plan |
//! | [`Implementer`] | code / implement | code draft |
//! | [`QualityGate`] | audit / lint / review, and every draft | quality report |
//! | [`VerificationRunner`] | test / verify | verification report |
//!
//! Domain failures (unrecognized directive, gate rejection) come back as
//! `Ok` outcomes with `success == false`. Provider failures that survive the
//! [`RetryPolicy`] and artifact store failures are errors.
//!
//! [`DirectiveKind`]: conclave_domain::DirectiveKind

mod architect;
mod coordinator;
mod implementer;
mod quality_gate;
mod verification;

pub use architect::Architect;
pub use coordinator::PipelineCoordinator;
pub use implementer::Implementer;
pub use quality_gate::QualityGate;
pub use verification::VerificationRunner;

use crate::ports::artifact_store::{ArtifactStore, StoreError};
use crate::ports::reasoning_provider::{AskOptions, ProviderError, ReasoningProvider};
use crate::retry::RetryPolicy;
use async_trait::async_trait;
use conclave_domain::{AgentOutcome, Artifact, SpecialistPromptTemplate, SpecialistRole};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{agent}: provider call failed: {source}")]
    Provider {
        agent: String,
        #[source]
        source: ProviderError,
    },

    #[error("Artifact store error: {0}")]
    Store(#[from] StoreError),
}

/// Extra material handed to a specialist alongside the command
#[derive(Debug, Clone, Default)]
pub struct AgentContext {
    pub notes: Option<String>,
}

impl AgentContext {
    pub fn with_notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
        }
    }

    /// Notes rendered for inclusion in a prompt, or an empty string.
    pub fn prompt_block(&self) -> String {
        SpecialistPromptTemplate::context_block(self.notes.as_deref())
    }
}

/// A pipeline specialist
#[async_trait]
pub trait SpecialistAgent: Send + Sync {
    fn name(&self) -> &str;

    fn role(&self) -> SpecialistRole;

    async fn execute(
        &self,
        command: &str,
        context: &AgentContext,
    ) -> Result<AgentOutcome, PipelineError>;
}

/// What every specialist needs: a provider to think with, a store to write
/// artifacts to, and the retry schedule for provider calls.
#[derive(Clone)]
pub struct SpecialistDeps {
    provider: Arc<dyn ReasoningProvider>,
    store: Arc<dyn ArtifactStore>,
    retry: RetryPolicy,
}

impl SpecialistDeps {
    pub fn new(provider: Arc<dyn ReasoningProvider>, store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            provider,
            store,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Ask the provider under the retry policy.
    pub(crate) async fn consult(
        &self,
        agent: &str,
        system: &str,
        prompt: &str,
    ) -> Result<String, PipelineError> {
        debug!("{} consulting {}", agent, self.provider.name());
        let provider = &self.provider;
        let options = AskOptions::default();
        let options = &options;
        self.retry
            .run(move |_| provider.ask(prompt, system, options))
            .await
            .map_err(|source| PipelineError::Provider {
                agent: agent.to_string(),
                source,
            })
    }

    /// Save `artifact` and return the copy carrying its stored path.
    pub(crate) async fn persist(&self, artifact: Artifact) -> Result<Artifact, PipelineError> {
        let path = self.store.save(&artifact).await?;
        debug!("Artifact {} stored at {}", artifact.id, path);
        Ok(artifact.with_path(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{BrokenStore, MemoryStore, QueueProvider};
    use std::time::Duration;

    #[tokio::test]
    async fn test_consult_retries_then_succeeds() {
        let provider = Arc::new(QueueProvider::new(
            "cloud",
            vec![
                Err(ProviderError::Timeout),
                Ok("answer".to_string()),
            ],
        ));
        let deps = SpecialistDeps::new(provider.clone(), Arc::new(MemoryStore::default()))
            .with_retry(RetryPolicy::new(3, Duration::ZERO));

        let answer = deps.consult("Implementer", "sys", "prompt").await.unwrap();
        assert_eq!(answer, "answer");
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_consult_exhaustion_is_an_error() {
        let provider = Arc::new(QueueProvider::new(
            "cloud",
            vec![Err(ProviderError::Timeout), Err(ProviderError::Timeout)],
        ));
        let deps = SpecialistDeps::new(provider, Arc::new(MemoryStore::default()))
            .with_retry(RetryPolicy::new(2, Duration::ZERO));

        let err = deps.consult("Architect", "sys", "prompt").await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Provider {
                source: ProviderError::Timeout,
                ..
            }
        ));
        assert!(err.to_string().starts_with("Architect"));
    }

    #[tokio::test]
    async fn test_persist_sets_path() {
        let store = Arc::new(MemoryStore::default());
        let deps = SpecialistDeps::new(
            Arc::new(QueueProvider::replying("cloud", &[])),
            store.clone(),
        );
        let artifact = Artifact::markdown("Notes", "body");
        let stored = deps.persist(artifact.clone()).await.unwrap();

        assert_eq!(stored.path.as_deref(), Some(format!("mem://{}", artifact.id).as_str()));
        assert!(!artifact.is_persisted());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_persist_propagates_store_failure() {
        let deps = SpecialistDeps::new(
            Arc::new(QueueProvider::replying("cloud", &[])),
            Arc::new(BrokenStore),
        );
        let err = deps.persist(Artifact::markdown("x", "y")).await.unwrap_err();
        assert!(matches!(err, PipelineError::Store(StoreError::Io(_))));
    }

    #[test]
    fn test_context_prompt_block() {
        assert_eq!(AgentContext::default().prompt_block(), "");
        assert!(
            AgentContext::with_notes("repo: conclave")
                .prompt_block()
                .contains("repo: conclave")
        );
    }
}
