//! Outcome of a specialist invocation.

use super::artifact::Artifact;
use serde::{Deserialize, Serialize};

/// `data` key an agent sets when it declines a directive and names who
/// should receive it instead.
pub const FORWARD_KEY: &str = "forward";

/// Result of a specialist agent invocation (Value Object)
///
/// Domain failures (unrecognized directive, gate rejection) are represented
/// as `success == false`, never as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentOutcome {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl AgentOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            artifacts: Vec::new(),
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            artifacts: Vec::new(),
            data: None,
        }
    }

    /// Decline the directive and point the caller at `target`.
    pub fn forward(message: impl Into<String>, target: &str) -> Self {
        Self::failure(message).with_data(serde_json::json!({ FORWARD_KEY: target }))
    }

    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.push(artifact);
        self
    }

    pub fn with_artifacts(mut self, artifacts: impl IntoIterator<Item = Artifact>) -> Self {
        self.artifacts.extend(artifacts);
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Target named by [`AgentOutcome::forward`], if any.
    pub fn forward_target(&self) -> Option<&str> {
        if self.success {
            return None;
        }
        self.data.as_ref()?.get(FORWARD_KEY)?.as_str()
    }

    /// Message followed by every artifact rendered inline.
    pub fn render(&self) -> String {
        if self.artifacts.is_empty() {
            return self.message.clone();
        }
        let artifacts = self
            .artifacts
            .iter()
            .map(Artifact::render_inline)
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("{}\n\n{}", self.message, artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_target() {
        let outcome = AgentOutcome::forward("not mine", "coordinator");
        assert!(!outcome.success);
        assert_eq!(outcome.forward_target(), Some("coordinator"));
        assert_eq!(AgentOutcome::failure("x").forward_target(), None);
    }

    #[test]
    fn test_success_never_forwards() {
        let outcome =
            AgentOutcome::success("done").with_data(serde_json::json!({ FORWARD_KEY: "x" }));
        assert_eq!(outcome.forward_target(), None);
    }

    #[test]
    fn test_render_includes_artifacts() {
        let outcome = AgentOutcome::success("Audit complete")
            .with_artifact(Artifact::markdown("Audit", "all good"));
        let text = outcome.render();
        assert!(text.starts_with("Audit complete"));
        assert!(text.contains("### Audit (markdown)"));
        assert!(text.contains("all good"));

        assert_eq!(AgentOutcome::failure("nope").render(), "nope");
    }
}
