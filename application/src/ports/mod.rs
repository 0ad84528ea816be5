//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod artifact_store;
pub mod debate_observer;
pub mod memory;
pub mod reasoning_provider;
