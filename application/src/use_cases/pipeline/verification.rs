//! Verification runner.

use super::{AgentContext, PipelineError, SpecialistAgent, SpecialistDeps};
use async_trait::async_trait;
use conclave_domain::{
    AgentOutcome, Artifact, SpecialistPromptTemplate, SpecialistRole, parse_review_verdict,
};
use serde_json::json;
use tracing::info;

pub struct VerificationRunner {
    deps: SpecialistDeps,
}

impl VerificationRunner {
    pub fn new(deps: SpecialistDeps) -> Self {
        Self { deps }
    }
}

#[async_trait]
impl SpecialistAgent for VerificationRunner {
    fn name(&self) -> &str {
        SpecialistRole::Verifier.display_name()
    }

    fn role(&self) -> SpecialistRole {
        SpecialistRole::Verifier
    }

    async fn execute(
        &self,
        command: &str,
        context: &AgentContext,
    ) -> Result<AgentOutcome, PipelineError> {
        info!("Verification runner: starting");
        let response = self
            .deps
            .consult(
                self.name(),
                SpecialistPromptTemplate::verifier_system(),
                &SpecialistPromptTemplate::verification(command, &context.prompt_block()),
            )
            .await?;

        let verdict = parse_review_verdict(&response);
        let report = self
            .deps
            .persist(Artifact::markdown("Verification Report", verdict.feedback))
            .await?;

        let outcome = if verdict.approved {
            AgentOutcome::success("Verification passed")
        } else {
            AgentOutcome::failure("Verification failed")
        };
        Ok(outcome
            .with_artifact(report)
            .with_data(json!({ "passed": verdict.approved })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryStore, QueueProvider};
    use std::sync::Arc;

    fn runner(reply: &str) -> VerificationRunner {
        VerificationRunner::new(SpecialistDeps::new(
            Arc::new(QueueProvider::replying("cloud", &[reply])),
            Arc::new(MemoryStore::default()),
        ))
    }

    #[tokio::test]
    async fn test_pass_and_fail() {
        let passed = runner("PASS\n12 checks green")
            .execute("verify the release", &AgentContext::default())
            .await
            .unwrap();
        assert!(passed.success);
        assert_eq!(passed.artifacts[0].title, "Verification Report");

        let failed = runner("FAIL\nflaky integration test")
            .execute("verify the release", &AgentContext::default())
            .await
            .unwrap();
        assert!(!failed.success);
        assert_eq!(failed.data.unwrap()["passed"], false);
    }
}
