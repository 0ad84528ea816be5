//! Persona table for plain queries.
//!
//! A persona is a fixed system prompt chosen by name. Recalled memory
//! snippets are appended to whichever system prompt is in effect via
//! [`with_recalled_memories`].

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    #[default]
    Default,
    Engineer,
    Strategist,
    Critic,
}

impl Persona {
    pub fn all() -> [Persona; 4] {
        [
            Persona::Default,
            Persona::Engineer,
            Persona::Strategist,
            Persona::Critic,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Default => "default",
            Persona::Engineer => "engineer",
            Persona::Strategist => "strategist",
            Persona::Critic => "critic",
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            Persona::Default => {
                "You are a precise, helpful assistant. Answer directly and say when you are unsure."
            }
            Persona::Engineer => {
                "You are a senior software engineer. Prefer concrete, working solutions, \
                 show code when it helps, and call out edge cases."
            }
            Persona::Strategist => {
                "You are a strategist. Weigh options, surface trade-offs and second-order \
                 effects, and end with a recommendation."
            }
            Persona::Critic => {
                "You are a critical reviewer. Look for flaws, missing evidence and hidden \
                 assumptions before acknowledging strengths."
            }
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Persona {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Persona::all()
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidPersona(s.to_string()))
    }
}

/// Append recalled memory snippets to `system` as an instruction block.
///
/// Returns `system` unchanged when there is nothing to append.
pub fn with_recalled_memories(system: &str, memories: &[String]) -> String {
    let memories: Vec<&str> = memories
        .iter()
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .collect();
    if memories.is_empty() {
        return system.to_string();
    }

    let mut prompt = format!(
        "{}\n\n## Recalled Memories\nUse these only if they are relevant to the request:\n",
        system
    );
    for memory in memories {
        prompt.push_str(&format!("- {}\n", memory));
    }
    prompt
}
