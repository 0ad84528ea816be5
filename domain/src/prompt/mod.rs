//! Prompt domain
//!
//! Templates for each debate phase and each specialist, plus the persona
//! table used for plain queries.

pub mod agent;
pub mod persona;
mod template;

pub use agent::SpecialistPromptTemplate;
pub use persona::{Persona, with_recalled_memories};
pub use template::PromptTemplate;
