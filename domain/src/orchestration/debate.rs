//! Debate lifecycle and the records a debate produces.
//!
//! A council cycle walks [`DebateState`] strictly forward:
//!
//! ```text
//! Idle → Divergence → Deliberation → Convergence → Adjourned
//! ```
//!
//! - [`Position`] - a member's independent proposal (Divergence)
//! - [`Critique`] - one member's critique of another's position (Deliberation)
//! - [`Ballot`] - a member's final vote over the aggregate context (Convergence)
//! - [`MinutesEntry`] - append-only log line of the whole cycle
//! - [`CouncilVerdict`] - the result returned to callers

use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Phase of a council debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebateState {
    #[default]
    Idle,
    /// Every member contemplates the topic independently
    Divergence,
    /// Every member critiques every other member's position
    Deliberation,
    /// Every member votes over the aggregate of all positions
    Convergence,
    Adjourned,
}

impl DebateState {
    fn ordinal(&self) -> u8 {
        match self {
            DebateState::Idle => 0,
            DebateState::Divergence => 1,
            DebateState::Deliberation => 2,
            DebateState::Convergence => 3,
            DebateState::Adjourned => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DebateState::Idle => "idle",
            DebateState::Divergence => "divergence",
            DebateState::Deliberation => "deliberation",
            DebateState::Convergence => "convergence",
            DebateState::Adjourned => "adjourned",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DebateState::Idle => "Idle",
            DebateState::Divergence => "Divergence",
            DebateState::Deliberation => "Deliberation",
            DebateState::Convergence => "Convergence",
            DebateState::Adjourned => "Adjourned",
        }
    }

    /// The three phases that issue provider calls, in order.
    pub fn phases() -> [DebateState; 3] {
        [
            DebateState::Divergence,
            DebateState::Deliberation,
            DebateState::Convergence,
        ]
    }

    /// Move to `next`, which must lie strictly ahead of `self`.
    pub fn advance(&mut self, next: DebateState) -> Result<(), DomainError> {
        if next.ordinal() <= self.ordinal() {
            return Err(DomainError::IllegalTransition {
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        *self = next;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, DebateState::Idle | DebateState::Adjourned)
    }
}

impl std::fmt::Display for DebateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One line of the debate minutes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinutesEntry {
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub message: String,
}

impl MinutesEntry {
    /// Create an entry stamped with the current UTC time.
    pub fn new(actor: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            actor: actor.into(),
            message: message.into(),
        }
    }
}

/// A member's independent proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub author: String,
    pub content: String,
}

impl Position {
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
        }
    }
}

/// A critique of `target`'s position written by `critic`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Critique {
    pub critic: String,
    pub target: String,
    pub content: String,
}

impl Critique {
    pub fn new(
        critic: impl Into<String>,
        target: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            critic: critic.into(),
            target: target.into(),
            content: content.into(),
        }
    }
}

/// A member's final vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub voter: String,
    pub content: String,
}

impl Ballot {
    pub fn new(voter: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            voter: voter.into(),
            content: content.into(),
        }
    }
}

/// Complete result of a council cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouncilVerdict {
    pub topic: String,
    /// Names of every registered member, whether or not it contributed
    pub participants: Vec<String>,
    /// Concatenated ballots
    pub result: String,
    pub minutes: Vec<MinutesEntry>,
    pub positions: Vec<Position>,
    pub critiques: Vec<Critique>,
    pub ballots: Vec<Ballot>,
}

impl CouncilVerdict {
    /// Concatenate ballots into the final result text.
    pub fn render_result(ballots: &[Ballot]) -> String {
        ballots
            .iter()
            .map(|b| format!("[{}] {}", b.voter, b.content.trim()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Critiques written by `critic`.
    pub fn critiques_by<'a>(&'a self, critic: &'a str) -> impl Iterator<Item = &'a Critique> {
        self.critiques.iter().filter(move |c| c.critic == critic)
    }

    /// Participants whose position made it into the debate.
    pub fn contributors(&self) -> impl Iterator<Item = &str> {
        self.positions.iter().map(|p| p.author.as_str())
    }
}
