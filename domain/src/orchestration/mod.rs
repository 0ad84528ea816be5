//! Orchestration domain: debate lifecycle and backend selection.

pub mod debate;
pub mod mode;

pub use debate::{Ballot, CouncilVerdict, Critique, DebateState, MinutesEntry, Position};
pub use mode::{Backend, DEFAULT_HYBRID_THRESHOLD, ReasoningMode};
