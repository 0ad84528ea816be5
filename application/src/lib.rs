//! Application layer for conclave
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod retry;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{CouncilParams, MIN_QUORUM, RouterParams};
pub use ports::{
    artifact_store::{ArtifactStore, StoreError},
    debate_observer::{DebateObserver, NoObserver},
    memory::{MemoryError, MemoryPort},
    reasoning_provider::{AskOptions, Councilor, ProviderError, ReasoningProvider},
};
pub use retry::RetryPolicy;
pub use use_cases::council::{CouncilError, DeliberationCouncil};
pub use use_cases::pipeline::{
    AgentContext, Architect, Implementer, PipelineCoordinator, PipelineError, QualityGate,
    SpecialistAgent, SpecialistDeps, VerificationRunner,
};
pub use use_cases::router::{RouteRequest, Router, RouterError};
