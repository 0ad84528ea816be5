//! Council configuration from TOML (`[council]` section)

use conclave_application::{CouncilParams, MIN_QUORUM};
use conclave_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Council configuration from TOML.
///
/// # Example
///
/// ```toml
/// [council]
/// quorum = 2
///
/// [[council.members]]
/// name = "Optimist"
/// role = "argues for the upside"
/// model = "llama3"
///
/// [[council.members]]
/// name = "Pessimist"
/// role = "argues for the risks"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Minimum members required to summon
    pub quorum: usize,
    pub members: Vec<FileCouncilMember>,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            quorum: MIN_QUORUM,
            members: Vec::new(),
        }
    }
}

/// One `[[council.members]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCouncilMember {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub model: Option<String>,
}

impl FileCouncilConfig {
    pub fn to_council_params(&self) -> (CouncilParams, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        if self.quorum < MIN_QUORUM {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidConstraint {
                    field: "council.quorum".to_string(),
                },
                format!("council.quorum must be at least {}, using {}", MIN_QUORUM, MIN_QUORUM),
            ));
        }

        for (i, member) in self.members.iter().enumerate() {
            if member.name.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyValue {
                        field: format!("council.members[{}].name", i),
                    },
                    format!("council member #{} has an empty name", i + 1),
                ));
            }
        }

        let params = CouncilParams::with_quorum(self.quorum);
        if !self.members.is_empty() && self.members.len() < params.quorum() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidConstraint {
                    field: "council.members".to_string(),
                },
                format!(
                    "{} council member(s) configured but quorum is {}; the council cannot convene",
                    self.members.len(),
                    params.quorum()
                ),
            ));
        }

        (params, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_council_members_deserialize() {
        let toml_str = r#"
[council]
quorum = 2

[[council.members]]
name = "Optimist"
role = "upside"
model = "llama3"

[[council.members]]
name = "Pessimist"
role = "risks"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.council.members.len(), 2);
        assert_eq!(config.council.members[0].model.as_deref(), Some("llama3"));
        assert!(config.council.members[1].model.is_none());
        let (params, issues) = config.council.to_council_params();
        assert_eq!(params.quorum(), 2);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_small_quorum_and_short_roster() {
        let config = FileCouncilConfig {
            quorum: 1,
            members: vec![FileCouncilMember {
                name: " ".to_string(),
                role: "solo".to_string(),
                model: None,
            }],
        };
        let (params, issues) = config.to_council_params();
        assert_eq!(params.quorum(), 2);
        assert_eq!(issues.len(), 3);
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 1);
    }
}
