//! Implementer: code drafts.

use super::{AgentContext, PipelineError, SpecialistAgent, SpecialistDeps};
use async_trait::async_trait;
use conclave_domain::{AgentOutcome, Artifact, SpecialistPromptTemplate, SpecialistRole};
use serde_json::json;
use tracing::info;

pub struct Implementer {
    deps: SpecialistDeps,
}

impl Implementer {
    pub fn new(deps: SpecialistDeps) -> Self {
        Self { deps }
    }
}

#[async_trait]
impl SpecialistAgent for Implementer {
    fn name(&self) -> &str {
        SpecialistRole::Implementer.display_name()
    }

    fn role(&self) -> SpecialistRole {
        SpecialistRole::Implementer
    }

    /// Draft code for `command`. The draft is not reviewed here.
    async fn execute(
        &self,
        command: &str,
        context: &AgentContext,
    ) -> Result<AgentOutcome, PipelineError> {
        info!("Implementer: drafting");
        let draft = self
            .deps
            .consult(
                self.name(),
                SpecialistPromptTemplate::implementer_system(),
                &SpecialistPromptTemplate::implement(command, &context.prompt_block()),
            )
            .await?;

        if draft.trim().is_empty() {
            return Ok(AgentOutcome::failure("Implementer produced an empty draft"));
        }

        let artifact = self
            .deps
            .persist(Artifact::code("Implementation Draft", draft))
            .await?;
        let draft_id = artifact.id.clone();
        Ok(AgentOutcome::success("Implementation draft ready")
            .with_artifact(artifact)
            .with_data(json!({ "draft_id": draft_id })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryStore, QueueProvider};
    use conclave_domain::ArtifactKind;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_draft_is_code_artifact() {
        let provider = Arc::new(QueueProvider::replying("cloud", &["fn limit() {}"]));
        let implementer =
            Implementer::new(SpecialistDeps::new(provider, Arc::new(MemoryStore::default())));

        let outcome = implementer
            .execute("CODE a rate limiter", &AgentContext::with_notes("tokio only"))
            .await
            .unwrap();

        assert!(outcome.success);
        let draft = &outcome.artifacts[0];
        assert_eq!(draft.kind, ArtifactKind::Code);
        assert_eq!(draft.content, "fn limit() {}");
        assert_eq!(
            outcome.data.as_ref().and_then(|d| d["draft_id"].as_str()),
            Some(draft.id.as_str())
        );
    }
}
