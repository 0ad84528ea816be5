//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`RouterParams`]: default mode, persona, hybrid threshold, token budget
//! - [`CouncilParams`]: council quorum
//!
//! Retry behaviour lives in [`RetryPolicy`](crate::retry::RetryPolicy).

pub mod council_params;
pub mod router_params;

pub use council_params::{CouncilParams, MIN_QUORUM};
pub use router_params::RouterParams;
