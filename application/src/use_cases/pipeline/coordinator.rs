//! Pipeline coordinator: routes directives to specialists.
//!
//! Routing follows [`DirectiveKind::classify`] (first matching rule wins):
//!
//! 1. genesis / ascension → [`Architect`]
//! 2. swarm operation → planned here, never executed
//! 3. code / implement → [`Implementer`] draft, then [`QualityGate`]
//! 4. test / verify → [`VerificationRunner`]
//! 5. audit / lint / review → [`QualityGate`]
//!
//! Anything else is reported as unrecognized; there is no fallback.

use super::{
    AgentContext, Architect, Implementer, PipelineError, QualityGate, SpecialistAgent,
    SpecialistDeps, VerificationRunner,
};
use async_trait::async_trait;
use conclave_domain::util::preview;
use conclave_domain::{
    AgentOutcome, Artifact, ArtifactKind, DirectiveKind, SpecialistPromptTemplate,
    SpecialistRole, parse_plan_steps,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

pub struct PipelineCoordinator {
    deps: SpecialistDeps,
    architect: Arc<Architect>,
    implementer: Implementer,
    gate: QualityGate,
    verifier: VerificationRunner,
}

impl PipelineCoordinator {
    /// Coordinator whose specialists all share `deps`.
    pub fn new(deps: SpecialistDeps) -> Self {
        Self {
            architect: Arc::new(Architect::new(deps.clone())),
            implementer: Implementer::new(deps.clone()),
            gate: QualityGate::new(deps.clone()),
            verifier: VerificationRunner::new(deps.clone()),
            deps,
        }
    }

    /// The architect this coordinator delegates genesis directives to.
    pub fn architect(&self) -> Arc<Architect> {
        Arc::clone(&self.architect)
    }

    /// Decompose a swarm operation into a stored plan.
    async fn plan_swarm(
        &self,
        command: &str,
        context: &AgentContext,
    ) -> Result<AgentOutcome, PipelineError> {
        info!("Coordinator: planning swarm operation");
        let response = self
            .deps
            .consult(
                self.name(),
                SpecialistPromptTemplate::coordinator_system(),
                &SpecialistPromptTemplate::swarm_plan(command, &context.prompt_block()),
            )
            .await?;

        let steps = parse_plan_steps(&response);
        if steps.is_empty() {
            warn!("Coordinator could not extract plan steps");
            let raw = self
                .deps
                .persist(Artifact::markdown("Unparsed Swarm Plan", response))
                .await?;
            return Ok(
                AgentOutcome::failure("Coordinator could not extract steps from the plan")
                    .with_artifact(raw),
            );
        }

        let mut body = format!("Objective: {}\n\n", command.trim());
        for (i, step) in steps.iter().enumerate() {
            body.push_str(&format!("{}. {}\n", i + 1, step));
        }
        let plan = self.deps.persist(Artifact::plan("Swarm Plan", body)).await?;

        Ok(
            AgentOutcome::success(format!("Swarm plan ready: {} steps", steps.len()))
                .with_artifact(plan)
                .with_data(json!({ "steps": steps })),
        )
    }

    /// Draft, then gate. The outcome succeeds only on approval; on rejection
    /// the draft and the report are both attached.
    async fn implement_and_gate(
        &self,
        command: &str,
        context: &AgentContext,
    ) -> Result<AgentOutcome, PipelineError> {
        let draft = self.implementer.execute(command, context).await?;
        if !draft.success {
            return Ok(draft);
        }
        let Some(code) = draft
            .artifacts
            .iter()
            .find(|a| a.kind == ArtifactKind::Code)
            .cloned()
        else {
            return Ok(AgentOutcome::failure("Implementer returned no code artifact")
                .with_artifacts(draft.artifacts));
        };

        let review = self.gate.review_artifact(&code).await?;
        let approved = review.success;
        let data = json!({ "approved": approved, "draft_id": code.id });
        let artifacts = draft.artifacts.into_iter().chain(review.artifacts);

        let outcome = if approved {
            AgentOutcome::success("Implementation approved by the quality gate")
        } else {
            AgentOutcome::failure("Quality gate rejected the implementation; draft retained")
        };
        Ok(outcome.with_artifacts(artifacts).with_data(data))
    }
}

#[async_trait]
impl SpecialistAgent for PipelineCoordinator {
    fn name(&self) -> &str {
        SpecialistRole::Coordinator.display_name()
    }

    fn role(&self) -> SpecialistRole {
        SpecialistRole::Coordinator
    }

    async fn execute(
        &self,
        command: &str,
        context: &AgentContext,
    ) -> Result<AgentOutcome, PipelineError> {
        let Some(kind) = DirectiveKind::classify(command) else {
            warn!("Unrecognized directive: '{}'", preview(command, 60));
            return Ok(AgentOutcome::failure(format!(
                "Unrecognized directive '{}': expected genesis, swarm operation, code, test or review",
                preview(command, 60)
            )));
        };

        info!("Coordinator: '{}' → {}", kind, kind.handler());
        match kind {
            DirectiveKind::Genesis => self.architect.execute(command, context).await,
            DirectiveKind::SwarmOperation => self.plan_swarm(command, context).await,
            DirectiveKind::Implement => self.implement_and_gate(command, context).await,
            DirectiveKind::Verify => self.verifier.execute(command, context).await,
            DirectiveKind::Review => self.gate.execute(command, context).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::reasoning_provider::ProviderError;
    use crate::retry::RetryPolicy;
    use crate::test_support::{MemoryStore, QueueProvider};
    use std::time::Duration;

    fn coordinator(provider: Arc<QueueProvider>) -> PipelineCoordinator {
        PipelineCoordinator::new(
            SpecialistDeps::new(provider, Arc::new(MemoryStore::default()))
                .with_retry(RetryPolicy::new(2, Duration::ZERO)),
        )
    }

    #[tokio::test]
    async fn test_code_approved() {
        let provider = Arc::new(QueueProvider::replying(
            "cloud",
            &["fn limiter() {}", "APPROVE\nLooks right."],
        ));
        let outcome = coordinator(provider.clone())
            .execute("CODE a token bucket", &AgentContext::default())
            .await
            .unwrap();

        assert!(outcome.success);
        let kinds: Vec<ArtifactKind> = outcome.artifacts.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![ArtifactKind::Code, ArtifactKind::Markdown]);
        assert_eq!(outcome.artifacts[1].title, "Quality Report");
        assert_eq!(provider.call_count(), 2);
        // the gate reviews the draft itself
        assert!(provider.asks()[1].prompt.contains("fn limiter() {}"));
    }

    #[tokio::test]
    async fn test_code_rejected_keeps_draft() {
        let provider = Arc::new(QueueProvider::replying(
            "cloud",
            &["fn limiter() { unsafe {} }", "REJECT\nUnjustified unsafe."],
        ));
        let outcome = coordinator(provider)
            .execute("CODE a token bucket", &AgentContext::default())
            .await
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.artifacts.len(), 2);
        assert_eq!(outcome.artifacts[0].content, "fn limiter() { unsafe {} }");
        assert!(outcome.artifacts[1].content.contains("Unjustified unsafe."));
        assert_eq!(outcome.data.unwrap()["approved"], false);
    }

    #[tokio::test]
    async fn test_swarm_operation_plans_only() {
        let provider = Arc::new(QueueProvider::replying(
            "cloud",
            &[r#"{"steps": ["inventory", "split", "cut over"]}"#],
        ));
        let outcome = coordinator(provider.clone())
            .execute("SWARM OPERATION: migrate billing", &AgentContext::default())
            .await
            .unwrap();

        assert!(outcome.success);
        assert_eq!(provider.call_count(), 1);
        let plan = &outcome.artifacts[0];
        assert_eq!(plan.kind, ArtifactKind::Plan);
        assert!(plan.content.contains("1. inventory\n2. split\n3. cut over"));
        assert_eq!(
            outcome.data.unwrap()["steps"],
            json!(["inventory", "split", "cut over"])
        );
    }

    #[tokio::test]
    async fn test_swarm_without_steps_fails() {
        let provider = Arc::new(QueueProvider::replying("cloud", &["no idea"]));
        let outcome = coordinator(provider)
            .execute("swarm operation now", &AgentContext::default())
            .await
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.artifacts[0].content, "no idea");
    }

    #[tokio::test]
    async fn test_genesis_delegates_to_architect() {
        let provider = Arc::new(QueueProvider::replying("cloud", &["## Current State"]));
        let outcome = coordinator(provider)
            .execute("genesis", &AgentContext::default())
            .await
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.artifacts[0].kind, ArtifactKind::Plan);
    }

    #[tokio::test]
    async fn test_review_goes_straight_to_gate() {
        let provider = Arc::new(QueueProvider::replying("cloud", &["LGTM"]));
        let outcome = coordinator(provider.clone())
            .execute("code review of the parser", &AgentContext::default())
            .await
            .unwrap();
        assert!(outcome.success);
        assert_eq!(provider.call_count(), 1);
        assert_eq!(outcome.artifacts[0].title, "Quality Report");
    }

    #[tokio::test]
    async fn test_verify_routes_to_runner() {
        let provider = Arc::new(QueueProvider::replying("cloud", &["PASS"]));
        let outcome = coordinator(provider)
            .execute("verify the release", &AgentContext::default())
            .await
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.artifacts[0].title, "Verification Report");
    }

    #[tokio::test]
    async fn test_unrecognized_directive() {
        let provider = Arc::new(QueueProvider::replying("cloud", &[]));
        let outcome = coordinator(provider.clone())
            .execute("make me a sandwich", &AgentContext::default())
            .await
            .unwrap();
        assert!(!outcome.success);
        assert!(outcome.message.starts_with("Unrecognized directive"));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_provider_exhaustion_is_an_error() {
        let provider = Arc::new(QueueProvider::new(
            "cloud",
            vec![
                Err(ProviderError::Timeout),
                Err(ProviderError::RequestFailed("502".to_string())),
            ],
        ));
        let err = coordinator(provider.clone())
            .execute("CODE x", &AgentContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Provider { .. }));
        assert_eq!(provider.call_count(), 2);
    }
}
