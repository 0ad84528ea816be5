//! Router parameters: backend selection and conversation window.
//!
//! [`RouterParams`] groups the static parameters the
//! [`Router`](crate::use_cases::router::Router) starts with. Mode and persona
//! can still be overridden per request through
//! [`RouteRequest`](crate::use_cases::router::RouteRequest).

use conclave_domain::{DEFAULT_HYBRID_THRESHOLD, DEFAULT_TOKEN_BUDGET, Persona, ReasoningMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterParams {
    /// Backend used when a request names none
    pub mode: ReasoningMode,
    /// Persona used when a request carries no explicit system prompt
    pub persona: Persona,
    /// Hybrid mode keeps prompts shorter than this (in chars) local
    pub hybrid_threshold: usize,
    /// Token budget of the conversation window
    pub token_budget: usize,
}

impl Default for RouterParams {
    fn default() -> Self {
        Self {
            mode: ReasoningMode::default(),
            persona: Persona::default(),
            hybrid_threshold: DEFAULT_HYBRID_THRESHOLD,
            token_budget: DEFAULT_TOKEN_BUDGET,
        }
    }
}

impl RouterParams {
    // ==================== Builder Methods ====================

    pub fn with_mode(mut self, mode: ReasoningMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.persona = persona;
        self
    }

    pub fn with_hybrid_threshold(mut self, threshold: usize) -> Self {
        self.hybrid_threshold = threshold;
        self
    }

    pub fn with_token_budget(mut self, budget: usize) -> Self {
        self.token_budget = budget;
        self
    }
}
