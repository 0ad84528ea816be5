//! Router use case
//!
//! Single entry point for instructions. Each request goes to exactly one of:
//!
//! 1. the specialist pipeline, when the text is a master directive
//!    ([`MasterDirective::detect`]); the Architect sees it first and the
//!    coordinator gets it when the Architect declines
//! 2. the council, when the request asks for a debate and a council is set up
//! 3. a single backend chosen by [`ReasoningMode`]
//!
//! Every answered request is appended to the conversation window.

use crate::config::RouterParams;
use crate::ports::memory::{MemoryError, MemoryPort};
use crate::ports::reasoning_provider::{AskOptions, ProviderError, ReasoningProvider};
use crate::use_cases::council::{CouncilError, DeliberationCouncil};
use crate::use_cases::pipeline::{AgentContext, PipelineError, SpecialistAgent};
use conclave_domain::util::preview;
use conclave_domain::{
    Backend, ContextBuffer, ContextMessage, MasterDirective, Persona, ReasoningMode,
    with_recalled_memories,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Council error: {0}")]
    Council(#[from] CouncilError),

    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    #[error("No reasoning backend is available")]
    NoBackend,
}

/// Per-request routing options
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    /// Overrides the router's default mode
    pub mode: Option<ReasoningMode>,
    /// Explicit system prompt; wins over any persona
    pub system: Option<String>,
    /// Overrides the router's default persona
    pub persona: Option<Persona>,
    /// Hand the prompt to the council instead of a single backend
    pub debate: bool,
    /// Index the prompt in long-term memory before answering
    pub remember: bool,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl RouteRequest {
    pub fn mode(mode: ReasoningMode) -> Self {
        Self {
            mode: Some(mode),
            ..Self::default()
        }
    }

    pub fn system(system: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            ..Self::default()
        }
    }

    pub fn debate() -> Self {
        Self {
            debate: true,
            ..Self::default()
        }
    }

    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.persona = Some(persona);
        self
    }

    pub fn remembered(mut self) -> Self {
        self.remember = true;
        self
    }
}

/// Routes instructions to the pipeline, the council or a backend
pub struct Router {
    cloud: Option<Arc<dyn ReasoningProvider>>,
    local: Option<Arc<dyn ReasoningProvider>>,
    architect: Arc<dyn SpecialistAgent>,
    coordinator: Arc<dyn SpecialistAgent>,
    council: Option<DeliberationCouncil>,
    memory: Option<Arc<dyn MemoryPort>>,
    context: ContextBuffer,
    params: RouterParams,
}

impl Router {
    pub fn new(
        architect: Arc<dyn SpecialistAgent>,
        coordinator: Arc<dyn SpecialistAgent>,
        params: RouterParams,
    ) -> Self {
        let context = ContextBuffer::with_budget(params.persona.system_prompt(), params.token_budget);
        Self {
            cloud: None,
            local: None,
            architect,
            coordinator,
            council: None,
            memory: None,
            context,
            params,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_cloud(mut self, provider: Arc<dyn ReasoningProvider>) -> Self {
        self.cloud = Some(provider);
        self
    }

    pub fn with_local(mut self, provider: Arc<dyn ReasoningProvider>) -> Self {
        self.local = Some(provider);
        self
    }

    pub fn with_council(mut self, council: DeliberationCouncil) -> Self {
        self.council = Some(council);
        self
    }

    pub fn with_memory(mut self, memory: Arc<dyn MemoryPort>) -> Self {
        self.memory = Some(memory);
        self
    }

    // ==================== Accessors ====================

    pub fn context(&self) -> &ContextBuffer {
        &self.context
    }

    pub fn clear_context(&mut self) {
        self.context.clear();
    }

    pub fn council_mut(&mut self) -> Option<&mut DeliberationCouncil> {
        self.council.as_mut()
    }

    pub fn params(&self) -> &RouterParams {
        &self.params
    }

    /// Answer `prompt`.
    pub async fn ask(&mut self, prompt: &str, request: RouteRequest) -> Result<String, RouterError> {
        if request.remember {
            let memory = self
                .memory
                .as_ref()
                .ok_or_else(|| MemoryError::Unavailable("no memory configured".to_string()))?;
            memory.embed(prompt).await?;
            debug!("Indexed prompt in long-term memory");
        }

        let answer = if let Some(kind) = MasterDirective::detect(prompt) {
            info!("Master directive ({:?}): '{}'", kind, preview(prompt, 60));
            self.dispatch_directive(prompt).await?
        } else if request.debate && self.council.is_some() {
            self.convene(prompt).await?
        } else {
            self.query(prompt, &request).await?
        };

        self.context.add(ContextMessage::user(prompt));
        self.context.add(ContextMessage::assistant(answer.clone()));
        Ok(answer)
    }

    async fn dispatch_directive(&self, prompt: &str) -> Result<String, RouterError> {
        let context = AgentContext::default();
        let outcome = self.architect.execute(prompt, &context).await?;

        let outcome = match outcome.forward_target() {
            Some(target) => {
                debug!("{} forwarded the directive to {}", self.architect.name(), target);
                self.coordinator.execute(prompt, &context).await?
            }
            None => outcome,
        };

        Ok(outcome.render())
    }

    async fn convene(&mut self, topic: &str) -> Result<String, RouterError> {
        let Some(council) = self.council.as_mut() else {
            return Err(RouterError::NoBackend);
        };
        let verdict = council.summon(topic).await?;
        Ok(verdict.result)
    }

    async fn query(&mut self, prompt: &str, request: &RouteRequest) -> Result<String, RouterError> {
        let base_system = match &request.system {
            Some(system) => system.clone(),
            None => request
                .persona
                .unwrap_or(self.params.persona)
                .system_prompt()
                .to_string(),
        };
        if base_system != self.context.system_instruction() {
            let evicted = self.context.update_system_instruction(base_system.clone());
            if evicted > 0 {
                debug!("System prompt change evicted {} turns", evicted);
            }
        }

        let memories = self.recall(prompt).await;
        let system = with_recalled_memories(&base_system, &memories);

        let options = AskOptions {
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            history: self.context.turns().cloned().collect(),
        };

        let mode = request.mode.unwrap_or(self.params.mode);
        let (provider, label) = self.select_backend(prompt, mode).await?;
        debug!("Routing query to {} ({})", provider.name(), mode);

        let answer = provider.ask(prompt, &system, &options).await?;
        Ok(match label {
            Some(label) => format!("{}\n\n{}", label, answer),
            None => answer,
        })
    }

    /// Recalled snippets for `prompt`; recall failure degrades to none.
    async fn recall(&self, prompt: &str) -> Vec<String> {
        let Some(memory) = &self.memory else {
            return Vec::new();
        };
        match memory.recall(prompt).await {
            Ok(snippets) => snippets,
            Err(e) => {
                warn!("Memory recall failed, continuing without: {}", e);
                Vec::new()
            }
        }
    }

    /// The local provider, when one is configured and live.
    async fn live_local(&self) -> Option<Arc<dyn ReasoningProvider>> {
        let local = self.local.as_ref()?;
        if local.is_available().await {
            Some(Arc::clone(local))
        } else {
            None
        }
    }

    /// Pick the provider for `prompt`, with the label to prefix when the
    /// preferred backend could not be used.
    async fn select_backend(
        &self,
        prompt: &str,
        mode: ReasoningMode,
    ) -> Result<(Arc<dyn ReasoningProvider>, Option<String>), RouterError> {
        match mode.preferred_backend(prompt, self.params.hybrid_threshold) {
            Backend::Local => {
                if let Some(local) = self.live_local().await {
                    return Ok((local, None));
                }
                let cloud = self.cloud.as_ref().ok_or(RouterError::NoBackend)?;
                // Without a configured local backend there is nothing to report.
                let Some(local) = &self.local else {
                    debug!("No local backend configured, using {}", cloud.name());
                    return Ok((Arc::clone(cloud), None));
                };
                warn!("{} unavailable, falling back to {}", local.name(), cloud.name());
                let label = format!("[{} unavailable; answered by {}]", local.name(), cloud.name());
                Ok((Arc::clone(cloud), Some(label)))
            }
            Backend::Cloud => {
                if let Some(cloud) = &self.cloud {
                    return Ok((Arc::clone(cloud), None));
                }
                let local = self.live_local().await.ok_or(RouterError::NoBackend)?;
                warn!("No cloud backend configured, answering locally");
                let label = format!("[cloud backend unavailable; answered by {}]", local.name());
                Ok((local, Some(label)))
            }
        }
    }
}
