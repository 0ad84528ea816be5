//! Directive classification as ordered rule tables.
//!
//! Two tables live here:
//!
//! - [`DirectiveKind::classify`] picks which specialist handles a pipeline
//!   command. Rules are evaluated top-down and the first match wins; no match
//!   means the directive is unrecognized.
//! - [`MasterDirective::detect`] decides whether a free-form instruction is a
//!   master directive at all (and goes to the specialist pipeline) or a
//!   general query.
//!
//! Matching works on normalized words (upper-cased, punctuation stripped), so
//! `"decode"` never matches the `CODE` marker.

use super::role::SpecialistRole;
use serde::{Deserialize, Serialize};

/// What a pipeline directive asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveKind {
    /// System genesis / ascension audit
    Genesis,
    /// Decompose into a swarm plan
    SwarmOperation,
    /// Draft code, then pass the quality gate
    Implement,
    /// Verification run
    Verify,
    /// Audit / lint / review
    Review,
}

struct DirectiveRule {
    kind: DirectiveKind,
    matches: fn(&Words) -> bool,
}

const DIRECTIVE_RULES: &[DirectiveRule] = &[
    DirectiveRule {
        kind: DirectiveKind::Genesis,
        matches: |w| w.any_exact(&["GENESIS", "ASCENSION"]),
    },
    DirectiveRule {
        kind: DirectiveKind::SwarmOperation,
        matches: |w| w.has_phrase("SWARM OPERATION"),
    },
    DirectiveRule {
        kind: DirectiveKind::Implement,
        matches: |w| {
            (w.any_exact(&["CODE", "CODES", "CODING"]) || w.any_prefix(&["IMPLEMENT"]))
                && !w.any_prefix(&["REVIEW"])
        },
    },
    DirectiveRule {
        kind: DirectiveKind::Verify,
        matches: |w| w.any_prefix(&["TEST", "VERIF"]),
    },
    DirectiveRule {
        kind: DirectiveKind::Review,
        matches: |w| w.any_prefix(&["AUDIT", "LINT", "REVIEW"]),
    },
];

impl DirectiveKind {
    /// First matching rule for `command`, or `None` when unrecognized.
    pub fn classify(command: &str) -> Option<DirectiveKind> {
        let words = Words::new(command);
        DIRECTIVE_RULES
            .iter()
            .find(|rule| (rule.matches)(&words))
            .map(|rule| rule.kind)
    }

    /// Specialist that owns this kind of directive.
    pub fn handler(&self) -> SpecialistRole {
        match self {
            DirectiveKind::Genesis => SpecialistRole::Architect,
            DirectiveKind::SwarmOperation => SpecialistRole::Coordinator,
            DirectiveKind::Implement => SpecialistRole::Implementer,
            DirectiveKind::Verify => SpecialistRole::Verifier,
            DirectiveKind::Review => SpecialistRole::QualityGate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DirectiveKind::Genesis => "genesis",
            DirectiveKind::SwarmOperation => "swarm_operation",
            DirectiveKind::Implement => "implement",
            DirectiveKind::Verify => "verify",
            DirectiveKind::Review => "review",
        }
    }
}

impl std::fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why an instruction was recognized as a master directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterDirective {
    /// Starts with `directive:` or `master directive`
    ExplicitPrefix,
    /// Carries a pipeline marker written in capitals (e.g. `GENESIS`, `CODE`)
    CapitalizedMarker,
}

const DIRECTIVE_PREFIXES: &[&str] = &["MASTER DIRECTIVE", "DIRECTIVE:"];

/// Markers of work only the pipeline does; they count only when written in
/// capitals. Review and verification requests need an explicit prefix.
const CAPITALIZED_MARKERS: &[&str] = &[
    "GENESIS",
    "ASCENSION",
    "SWARM OPERATION",
    "CODE",
    "IMPLEMENT",
];

struct MasterRule {
    kind: MasterDirective,
    matches: fn(&str) -> bool,
}

const MASTER_RULES: &[MasterRule] = &[
    MasterRule {
        kind: MasterDirective::ExplicitPrefix,
        matches: |text| {
            let head = text.trim_start().to_uppercase();
            DIRECTIVE_PREFIXES.iter().any(|p| head.starts_with(p))
        },
    },
    MasterRule {
        kind: MasterDirective::CapitalizedMarker,
        matches: |text| {
            let raw = Words::raw(text);
            CAPITALIZED_MARKERS.iter().any(|m| raw.has_phrase(m))
        },
    },
];

impl MasterDirective {
    /// First matching master-directive rule, or `None` for a general query.
    pub fn detect(text: &str) -> Option<MasterDirective> {
        MASTER_RULES
            .iter()
            .find(|rule| (rule.matches)(text))
            .map(|rule| rule.kind)
    }
}

/// Instruction split into words for rule matching.
struct Words {
    words: Vec<String>,
}

impl Words {
    /// Upper-cased words.
    fn new(text: &str) -> Self {
        Self::split(&text.to_uppercase())
    }

    /// Words with their original casing.
    fn raw(text: &str) -> Self {
        Self::split(text)
    }

    fn split(text: &str) -> Self {
        let words = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        Self { words }
    }

    fn any_exact(&self, targets: &[&str]) -> bool {
        self.words.iter().any(|w| targets.contains(&w.as_str()))
    }

    fn any_prefix(&self, prefixes: &[&str]) -> bool {
        self.words
            .iter()
            .any(|w| prefixes.iter().any(|p| w.starts_with(p)))
    }

    /// Consecutive words equal to the space-separated `phrase`.
    fn has_phrase(&self, phrase: &str) -> bool {
        let target: Vec<&str> = phrase.split(' ').collect();
        self.words
            .windows(target.len())
            .any(|window| window.iter().zip(&target).all(|(w, t)| w == t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_genesis_first() {
        assert_eq!(
            DirectiveKind::classify("Begin genesis and implement the core"),
            Some(DirectiveKind::Genesis)
        );
        assert_eq!(
            DirectiveKind::classify("ASCENSION protocol"),
            Some(DirectiveKind::Genesis)
        );
    }

    #[test]
    fn test_classify_swarm_operation() {
        assert_eq!(
            DirectiveKind::classify("Swarm operation: migrate the billing service"),
            Some(DirectiveKind::SwarmOperation)
        );
        // both words, but not as a phrase
        assert_ne!(
            DirectiveKind::classify("operation of the swarm"),
            Some(DirectiveKind::SwarmOperation)
        );
    }

    #[test]
    fn test_classify_implement_unless_review() {
        assert_eq!(
            DirectiveKind::classify("CODE a rate limiter"),
            Some(DirectiveKind::Implement)
        );
        assert_eq!(
            DirectiveKind::classify("implementation of the parser"),
            Some(DirectiveKind::Implement)
        );
        assert_eq!(
            DirectiveKind::classify("code review of the parser"),
            Some(DirectiveKind::Review)
        );
    }

    #[test]
    fn test_classify_verify_and_review() {
        assert_eq!(
            DirectiveKind::classify("run the tests"),
            Some(DirectiveKind::Verify)
        );
        assert_eq!(
            DirectiveKind::classify("verify the release"),
            Some(DirectiveKind::Verify)
        );
        assert_eq!(
            DirectiveKind::classify("lint the workspace"),
            Some(DirectiveKind::Review)
        );
        assert_eq!(
            DirectiveKind::classify("audit dependencies"),
            Some(DirectiveKind::Review)
        );
    }

    #[test]
    fn test_classify_unrecognized() {
        assert_eq!(DirectiveKind::classify("make me a sandwich"), None);
        assert_eq!(DirectiveKind::classify("decode this string"), None);
        assert_eq!(DirectiveKind::classify(""), None);
    }

    #[test]
    fn test_handler_mapping() {
        assert_eq!(DirectiveKind::Genesis.handler(), SpecialistRole::Architect);
        assert_eq!(DirectiveKind::Implement.handler(), SpecialistRole::Implementer);
        assert_eq!(DirectiveKind::Review.handler(), SpecialistRole::QualityGate);
    }

    #[test]
    fn test_master_directive_prefix() {
        assert_eq!(
            MasterDirective::detect("  directive: rebuild the index"),
            Some(MasterDirective::ExplicitPrefix)
        );
        assert_eq!(
            MasterDirective::detect("Master Directive - audit everything"),
            Some(MasterDirective::ExplicitPrefix)
        );
    }

    #[test]
    fn test_master_directive_capitalized_marker() {
        assert_eq!(
            MasterDirective::detect("Initiate GENESIS for the new module"),
            Some(MasterDirective::CapitalizedMarker)
        );
        assert_eq!(
            MasterDirective::detect("Please SWARM OPERATION the migration"),
            Some(MasterDirective::CapitalizedMarker)
        );
    }

    #[test]
    fn test_general_queries_are_not_directives() {
        assert_eq!(MasterDirective::detect("What is the genesis of Rust?"), None);
        assert_eq!(MasterDirective::detect("how do I write code?"), None);
        assert_eq!(MasterDirective::detect("Is AI dangerous?"), None);
    }

    #[test]
    fn test_capitalized_review_words_stay_queries() {
        assert_eq!(MasterDirective::detect("Is this a TEST?"), None);
        assert_eq!(MasterDirective::detect("REVIEW: what did the paper find?"), None);
        assert_eq!(MasterDirective::detect("Please VERIFY my reasoning"), None);
        assert_eq!(
            MasterDirective::detect("directive: verify the release"),
            Some(MasterDirective::ExplicitPrefix)
        );
        assert_eq!(
            MasterDirective::detect("CODE a token bucket"),
            Some(MasterDirective::CapitalizedMarker)
        );
    }
}
