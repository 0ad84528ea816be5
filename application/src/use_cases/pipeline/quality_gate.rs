//! Quality gate: the mandatory review step.
//!
//! Every implementation draft passes through [`QualityGate::review_artifact`];
//! audit / lint / review directives reach it directly through `execute`.
//! The verdict comes from [`parse_review_verdict`], which rejects anything
//! it cannot read as an approval.

use super::{AgentContext, PipelineError, SpecialistAgent, SpecialistDeps};
use async_trait::async_trait;
use conclave_domain::{
    AgentOutcome, Artifact, SpecialistPromptTemplate, SpecialistRole, parse_review_verdict,
};
use serde_json::json;
use tracing::{info, warn};

pub struct QualityGate {
    deps: SpecialistDeps,
}

impl QualityGate {
    pub fn new(deps: SpecialistDeps) -> Self {
        Self { deps }
    }

    /// Review a stored artifact. Success means approval.
    pub async fn review_artifact(&self, artifact: &Artifact) -> Result<AgentOutcome, PipelineError> {
        let subject = format!("{} ({})", artifact.title, artifact.kind);
        self.review(&subject, &artifact.content, Some(&artifact.id))
            .await
    }

    async fn review(
        &self,
        subject: &str,
        material: &str,
        reviewed_id: Option<&str>,
    ) -> Result<AgentOutcome, PipelineError> {
        let response = self
            .deps
            .consult(
                self.name(),
                SpecialistPromptTemplate::quality_gate_system(),
                &SpecialistPromptTemplate::quality_review(subject, material),
            )
            .await?;

        let verdict = parse_review_verdict(&response);
        if verdict.approved {
            info!("Quality gate approved {}", subject);
        } else {
            warn!("Quality gate rejected {}", subject);
        }

        let report = self
            .deps
            .persist(Artifact::markdown("Quality Report", verdict.feedback))
            .await?;
        let data = json!({ "approved": verdict.approved, "reviewed": reviewed_id });

        let outcome = if verdict.approved {
            AgentOutcome::success(format!("Quality gate approved {}", subject))
        } else {
            AgentOutcome::failure(format!("Quality gate rejected {}", subject))
        };
        Ok(outcome.with_artifact(report).with_data(data))
    }
}

#[async_trait]
impl SpecialistAgent for QualityGate {
    fn name(&self) -> &str {
        SpecialistRole::QualityGate.display_name()
    }

    fn role(&self) -> SpecialistRole {
        SpecialistRole::QualityGate
    }

    async fn execute(
        &self,
        command: &str,
        context: &AgentContext,
    ) -> Result<AgentOutcome, PipelineError> {
        let material = match context.notes.as_deref() {
            Some(notes) if !notes.trim().is_empty() => format!("{}\n\n{}", command, notes),
            _ => command.to_string(),
        };
        self.review("request", &material, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryStore, QueueProvider};
    use std::sync::Arc;

    fn gate(replies: &[&str]) -> QualityGate {
        QualityGate::new(SpecialistDeps::new(
            Arc::new(QueueProvider::replying("cloud", replies)),
            Arc::new(MemoryStore::default()),
        ))
    }

    #[tokio::test]
    async fn test_approval_on_first_line() {
        let draft = Artifact::code("Implementation Draft", "fn main() {}");
        let outcome = gate(&["APPROVE\nClean."])
            .review_artifact(&draft)
            .await
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.artifacts[0].title, "Quality Report");
        let data = outcome.data.unwrap();
        assert_eq!(data["approved"], true);
        assert_eq!(data["reviewed"], draft.id.as_str());
    }

    #[tokio::test]
    async fn test_unclear_verdict_rejects() {
        let outcome = gate(&["Hmm, interesting."])
            .execute("audit the auth module", &AgentContext::default())
            .await
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.artifacts.len(), 1);
        assert_eq!(outcome.data.unwrap()["approved"], false);
    }
}
