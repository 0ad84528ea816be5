//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod council;
pub mod pipeline;
pub mod router;
