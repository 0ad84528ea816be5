//! Parsing structured decisions out of free-form model text.
//!
//! Pure text pattern matching, no I/O:
//!
//! | Function | Use | Looks for |
//! |----------|-----|-----------|
//! | [`parse_review_verdict`] | quality gate, verification | APPROVE / PASS vs REJECT / REVISE / FAIL |
//! | [`parse_plan_steps`] | swarm planning | JSON step list or numbered / bulleted lines |

use serde::{Deserialize, Serialize};

/// Approval decision extracted from a review response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewVerdict {
    pub approved: bool,
    pub feedback: String,
}

const APPROVAL_WORDS: &[&str] = &["APPROVE", "APPROVED", "PASS", "PASSED", "LGTM"];
const REJECTION_WORDS: &[&str] = &[
    "REJECT", "REJECTED", "REJECTS", "REVISE", "FAIL", "FAILED", "FAILS",
];
const NEGATED_APPROVAL: &[&str] = &["NOT APPROVE", "NOT APPROVED", "CANNOT APPROVE", "DON'T APPROVE"];

/// Parse a review response into approve/reject.
///
/// A verdict keyword on the first non-empty line decides. Otherwise the whole
/// text is scanned: any rejection keyword or negated approval wins over an
/// approval keyword, and ambiguity defaults to rejection.
pub fn parse_review_verdict(response: &str) -> ReviewVerdict {
    let feedback = response.to_string();

    if let Some(first) = response.lines().find(|l| !l.trim().is_empty()) {
        let head = first.trim().trim_start_matches(['#', '*', ' ']).to_uppercase();
        let head_word = head
            .split(|c: char| !c.is_alphanumeric())
            .find(|w| !w.is_empty())
            .unwrap_or("");
        if REJECTION_WORDS.contains(&head_word) {
            return ReviewVerdict {
                approved: false,
                feedback,
            };
        }
        if APPROVAL_WORDS.contains(&head_word) {
            return ReviewVerdict {
                approved: true,
                feedback,
            };
        }
    }

    let upper = response.to_uppercase();
    let words: Vec<&str> = upper
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .collect();

    let negated = NEGATED_APPROVAL.iter().any(|p| upper.contains(p));
    let rejected = negated
        || words.iter().any(|w| REJECTION_WORDS.contains(w));
    let approved = words.iter().any(|w| APPROVAL_WORDS.contains(w));

    ReviewVerdict {
        approved: approved && !rejected,
        feedback,
    }
}

/// Extract an ordered step list from a planning response.
///
/// Accepted shapes, in order:
/// 1. JSON (raw or inside a ```json fence): `["step", ...]` or `{"steps": [...]}`
///    where steps are strings or objects with a `description`
/// 2. Numbered (`1.` / `1)`) or bulleted (`-` / `*`) lines
///
/// Returns an empty list when nothing step-like is found.
pub fn parse_plan_steps(response: &str) -> Vec<String> {
    if let Some(steps) = parse_json_steps(response) {
        return steps;
    }

    response
        .lines()
        .filter_map(|line| strip_list_marker(line.trim()))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_json_steps(response: &str) -> Option<Vec<String>> {
    let candidate = fenced_json(response).unwrap_or(response.trim());
    let value: serde_json::Value = serde_json::from_str(candidate).ok()?;
    let array = match &value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(map) => map.get("steps")?.as_array()?,
        _ => return None,
    };

    let steps: Vec<String> = array
        .iter()
        .filter_map(|item| match item {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            serde_json::Value::Object(obj) => obj
                .get("description")
                .and_then(|d| d.as_str())
                .map(|d| d.trim().to_string()),
            _ => None,
        })
        .collect();

    if steps.is_empty() { None } else { Some(steps) }
}

fn fenced_json(response: &str) -> Option<&str> {
    let start = response.find("```json")? + "```json".len();
    let rest = &response[start..];
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}

fn strip_list_marker(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Some(rest.trim());
    }
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    rest.strip_prefix(". ")
        .or_else(|| rest.strip_prefix(") "))
        .map(str::trim)
}
