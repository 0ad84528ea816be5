//! Debate observer port
//!
//! Receives council events as they happen: phase changes, per-member
//! completion and every minutes entry.

use conclave_domain::{DebateState, MinutesEntry};

/// Callback for council progress
///
/// Implementations live in the infrastructure or presentation layer and can
/// record or display the debate in various ways (log file, console, ...).
pub trait DebateObserver: Send + Sync {
    /// Called for every minutes entry, including registrations
    fn on_minutes(&self, entry: &MinutesEntry);

    /// Called when the council enters `state`; `members` is the number of
    /// tasks the phase will run.
    fn on_state_change(&self, _state: DebateState, _members: usize) {}

    /// Called when one member finishes its task within a phase
    fn on_member_complete(&self, _state: DebateState, _member: &str, _success: bool) {}
}

/// No-op observer for when nobody is watching
pub struct NoObserver;

impl DebateObserver for NoObserver {
    fn on_minutes(&self, _entry: &MinutesEntry) {}
}
