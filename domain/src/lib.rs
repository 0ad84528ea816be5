//! Domain layer for conclave
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns and
//! performs no I/O.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A deliberation council runs a three-phase peer debate over a
//! [`BoundedSet`] of reasoning providers:
//!
//! - **Divergence**: every member forms an independent [`Position`]
//! - **Deliberation**: every member writes a [`Critique`] of every other position
//! - **Convergence**: every member casts a [`Ballot`] over the aggregate context
//!
//! [`DebateState`] tracks the phase and only ever moves forward within one
//! cycle; [`MinutesEntry`] lines record what happened.
//!
//! ## Specialist pipeline
//!
//! Master directives are classified by ordered rule tables
//! ([`MasterDirective`], [`DirectiveKind`]) and produce an [`AgentOutcome`]
//! with [`Artifact`]s.
//!
//! ## Context
//!
//! [`ContextBuffer`] is the token-bounded sliding window of conversation.

pub mod agent;
pub mod context;
pub mod core;
pub mod orchestration;
pub mod prompt;
pub mod util;

// Re-export commonly used types
pub use agent::{
    AgentOutcome, Artifact, ArtifactKind, DirectiveKind, MasterDirective, ReviewVerdict,
    SpecialistRole, parse_plan_steps, parse_review_verdict,
};
pub use context::{ContextBuffer, ContextMessage, DEFAULT_TOKEN_BUDGET, Role, estimate_tokens};
pub use core::{
    bounded_set::BoundedSet,
    error::DomainError,
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
pub use orchestration::{
    Backend, Ballot, CouncilVerdict, Critique, DEFAULT_HYBRID_THRESHOLD, DebateState,
    MinutesEntry, Position, ReasoningMode,
};
pub use prompt::{Persona, PromptTemplate, SpecialistPromptTemplate, with_recalled_memories};
