//! Router configuration from TOML (`[router]` section)

use conclave_domain::{
    ConfigIssue, ConfigIssueCode, DEFAULT_HYBRID_THRESHOLD, Persona, ReasoningMode,
};
use serde::{Deserialize, Serialize};

/// Router configuration from TOML.
///
/// # Example
///
/// ```toml
/// [router]
/// mode = "hybrid"          # "local", "cloud" or "hybrid"
/// persona = "engineer"     # "default", "engineer", "strategist" or "critic"
/// hybrid_threshold = 200
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRouterConfig {
    pub mode: String,
    pub persona: String,
    /// Prompts shorter than this (in chars) stay local in hybrid mode
    pub hybrid_threshold: usize,
}

impl Default for FileRouterConfig {
    fn default() -> Self {
        Self {
            mode: ReasoningMode::default().as_str().to_string(),
            persona: Persona::default().as_str().to_string(),
            hybrid_threshold: DEFAULT_HYBRID_THRESHOLD,
        }
    }
}

impl FileRouterConfig {
    pub fn parse_mode(&self) -> (ReasoningMode, Vec<ConfigIssue>) {
        match self.mode.parse::<ReasoningMode>() {
            Ok(mode) => (mode, vec![]),
            Err(_) => (
                ReasoningMode::default(),
                vec![invalid_enum(
                    "router.mode",
                    &self.mode,
                    &["local", "cloud", "hybrid"],
                    ReasoningMode::default().as_str(),
                )],
            ),
        }
    }

    pub fn parse_persona(&self) -> (Persona, Vec<ConfigIssue>) {
        match self.persona.parse::<Persona>() {
            Ok(persona) => (persona, vec![]),
            Err(_) => {
                let valid: Vec<&str> = Persona::all().iter().map(Persona::as_str).collect();
                (
                    Persona::default(),
                    vec![invalid_enum(
                        "router.persona",
                        &self.persona,
                        &valid,
                        Persona::default().as_str(),
                    )],
                )
            }
        }
    }
}

fn invalid_enum(field: &str, value: &str, valid: &[&str], fallback: &str) -> ConfigIssue {
    ConfigIssue::warning(
        ConfigIssueCode::InvalidEnumValue {
            field: field.to_string(),
            value: value.to_string(),
            valid_values: valid.iter().map(|v| v.to_string()).collect(),
        },
        format!(
            "{}: unknown value '{}', falling back to '{}'",
            field, value, fallback
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_config_default() {
        let config = FileRouterConfig::default();
        assert_eq!(config.mode, "cloud");
        assert_eq!(config.persona, "default");
        assert_eq!(config.hybrid_threshold, 280);
    }

    #[test]
    fn test_parse_valid_values() {
        let config = FileRouterConfig {
            mode: "Hybrid".to_string(),
            persona: "critic".to_string(),
            hybrid_threshold: 100,
        };
        assert_eq!(config.parse_mode(), (ReasoningMode::Hybrid, vec![]));
        assert_eq!(config.parse_persona(), (Persona::Critic, vec![]));
    }

    #[test]
    fn test_unknown_mode_falls_back() {
        let config = FileRouterConfig {
            mode: "quantum".to_string(),
            ..FileRouterConfig::default()
        };
        let (mode, issues) = config.parse_mode();
        assert_eq!(mode, ReasoningMode::Cloud);
        assert!(matches!(
            &issues[0].code,
            ConfigIssueCode::InvalidEnumValue { field, .. } if field == "router.mode"
        ));
    }
}
