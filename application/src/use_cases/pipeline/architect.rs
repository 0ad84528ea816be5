//! Architect: genesis and ascension audits.

use super::{AgentContext, PipelineError, SpecialistAgent, SpecialistDeps};
use async_trait::async_trait;
use conclave_domain::util::preview;
use conclave_domain::{
    AgentOutcome, Artifact, DirectiveKind, SpecialistPromptTemplate, SpecialistRole,
};
use tracing::{debug, info};

/// Produces a system audit and plan for genesis directives and forwards
/// every other directive to the coordinator.
pub struct Architect {
    deps: SpecialistDeps,
}

impl Architect {
    pub fn new(deps: SpecialistDeps) -> Self {
        Self { deps }
    }
}

#[async_trait]
impl SpecialistAgent for Architect {
    fn name(&self) -> &str {
        SpecialistRole::Architect.display_name()
    }

    fn role(&self) -> SpecialistRole {
        SpecialistRole::Architect
    }

    async fn execute(
        &self,
        command: &str,
        context: &AgentContext,
    ) -> Result<AgentOutcome, PipelineError> {
        if DirectiveKind::classify(command) != Some(DirectiveKind::Genesis) {
            debug!("Architect declined '{}'", preview(command, 60));
            return Ok(AgentOutcome::forward(
                format!(
                    "The Architect only handles genesis directives; forwarding to the {}",
                    SpecialistRole::Coordinator
                ),
                SpecialistRole::Coordinator.as_str(),
            ));
        }

        info!("Architect: system audit for '{}'", preview(command, 60));
        let audit = self
            .deps
            .consult(
                self.name(),
                SpecialistPromptTemplate::architect_system(),
                &SpecialistPromptTemplate::architect_audit(command, &context.prompt_block()),
            )
            .await?;

        if audit.trim().is_empty() {
            return Ok(AgentOutcome::failure("Architect returned an empty audit"));
        }

        let artifact = self
            .deps
            .persist(Artifact::plan("System Audit & Plan", audit))
            .await?;
        Ok(AgentOutcome::success("System audit complete").with_artifact(artifact))
    }
}
