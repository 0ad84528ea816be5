//! Specialist roles in the directive pipeline.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialistRole {
    /// Genesis/ascension audits and system plans
    Architect,
    /// Routes directives and decomposes swarm operations
    Coordinator,
    /// Drafts code
    Implementer,
    /// Mandatory review step
    QualityGate,
    /// Verification runs
    Verifier,
}

impl SpecialistRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialistRole::Architect => "architect",
            SpecialistRole::Coordinator => "coordinator",
            SpecialistRole::Implementer => "implementer",
            SpecialistRole::QualityGate => "quality_gate",
            SpecialistRole::Verifier => "verifier",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SpecialistRole::Architect => "Architect",
            SpecialistRole::Coordinator => "Pipeline Coordinator",
            SpecialistRole::Implementer => "Implementer",
            SpecialistRole::QualityGate => "Quality Gate",
            SpecialistRole::Verifier => "Verification Runner",
        }
    }
}

impl std::fmt::Display for SpecialistRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
