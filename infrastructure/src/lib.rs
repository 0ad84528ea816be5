//! Infrastructure layer for conclave
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading and
//! tracing setup.

pub mod artifact;
pub mod config;
pub mod logging;
pub mod memory;
pub mod providers;

// Re-export commonly used types
pub use artifact::InMemoryArtifactStore;
pub use config::{
    ConfigLoader, FileConfig, FileContextConfig, FileCouncilConfig, FileCouncilMember,
    FileRetryConfig, FileRouterConfig,
};
pub use logging::{JsonlMinutesRecorder, init_tracing};
pub use memory::NullMemory;
pub use providers::{ProviderKind, ScriptedProvider};
