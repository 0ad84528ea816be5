//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid artifact kind: {0}")]
    InvalidArtifactKind(String),

    #[error("Invalid reasoning mode: {0}")]
    InvalidMode(String),

    #[error("Invalid persona: {0}")]
    InvalidPersona(String),

    #[error("Debate state cannot move from {from} to {to}")]
    IllegalTransition { from: String, to: String },
}

impl DomainError {
    /// Check if this error comes from parsing user-supplied text
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidArtifactKind(_)
                | DomainError::InvalidMode(_)
                | DomainError::InvalidPersona(_)
        )
    }
}
