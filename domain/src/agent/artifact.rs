//! Artifacts produced by specialist agents.

use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static ARTIFACT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Kind of artifact content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Markdown,
    Json,
    Code,
    Plan,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Markdown => "markdown",
            ArtifactKind::Json => "json",
            ArtifactKind::Code => "code",
            ArtifactKind::Plan => "plan",
        }
    }

    /// File extension an artifact store would use for this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Markdown | ArtifactKind::Plan => "md",
            ArtifactKind::Json => "json",
            ArtifactKind::Code => "txt",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ArtifactKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(ArtifactKind::Markdown),
            "json" => Ok(ArtifactKind::Json),
            "code" => Ok(ArtifactKind::Code),
            "plan" => Ok(ArtifactKind::Plan),
            _ => Err(DomainError::InvalidArtifactKind(s.to_string())),
        }
    }
}

/// An immutable document produced by a specialist (Value Object)
///
/// Persisting an artifact does not mutate it; the store returns a location
/// and [`Artifact::with_path`] produces the persisted copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: String,
    pub kind: ArtifactKind,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Artifact {
    /// Create an artifact with a process-unique id.
    pub fn new(kind: ArtifactKind, title: impl Into<String>, content: impl Into<String>) -> Self {
        let created_at = Utc::now();
        let seq = ARTIFACT_SEQ.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("{}-{}-{}", kind, created_at.timestamp_millis(), seq),
            kind,
            title: title.into(),
            content: content.into(),
            created_at,
            path: None,
        }
    }

    pub fn markdown(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(ArtifactKind::Markdown, title, content)
    }

    pub fn code(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(ArtifactKind::Code, title, content)
    }

    pub fn plan(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(ArtifactKind::Plan, title, content)
    }

    pub fn json(title: impl Into<String>, value: &serde_json::Value) -> Self {
        let content = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        Self::new(ArtifactKind::Json, title, content)
    }

    /// Copy of this artifact carrying its persisted location.
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..self.clone()
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.path.is_some()
    }

    /// Render for inline display inside a textual answer.
    pub fn render_inline(&self) -> String {
        let fence = match self.kind {
            ArtifactKind::Code => "```",
            ArtifactKind::Json => "```json",
            ArtifactKind::Markdown | ArtifactKind::Plan => "",
        };
        let location = self
            .path
            .as_deref()
            .map(|p| format!(" @ {}", p))
            .unwrap_or_default();
        if fence.is_empty() {
            format!("### {} ({}){}\n{}", self.title, self.kind, location, self.content)
        } else {
            format!(
                "### {} ({}){}\n{}\n{}\n```",
                self.title, self.kind, location, fence, self.content
            )
        }
    }
}
