//! Specialist pipeline domain: roles, directive rules, outcomes and artifacts.

pub mod artifact;
pub mod directive;
pub mod outcome;
pub mod role;
pub mod verdict;

pub use artifact::{Artifact, ArtifactKind};
pub use directive::{DirectiveKind, MasterDirective};
pub use outcome::{AgentOutcome, FORWARD_KEY};
pub use role::SpecialistRole;
pub use verdict::{ReviewVerdict, parse_plan_steps, parse_review_verdict};
