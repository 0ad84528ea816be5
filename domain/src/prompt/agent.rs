//! Prompt templates for the specialist pipeline

/// Templates for specialist agent prompts
pub struct SpecialistPromptTemplate;

impl SpecialistPromptTemplate {
    pub fn architect_system() -> &'static str {
        r#"You are the Architect. You audit systems end to end and produce
structured plans: current state, risks, target architecture, and ordered milestones.
Write in Markdown with clear headers."#
    }

    pub fn architect_audit(directive: &str, context: &str) -> String {
        format!(
            r#"Directive:
{directive}
{context}
Produce a system audit and plan for this directive with these sections:
## Current State
## Risks
## Target Architecture
## Milestones"#
        )
    }

    pub fn coordinator_system() -> &'static str {
        r#"You are the Pipeline Coordinator. You break large operations into small,
independently verifiable steps. You plan; you never execute."#
    }

    pub fn swarm_plan(directive: &str, context: &str) -> String {
        format!(
            r#"Operation:
{directive}
{context}
Decompose the operation into ordered steps. Respond with a JSON object:

```json
{{"steps": ["first step", "second step"]}}
```"#
        )
    }

    pub fn implementer_system() -> &'static str {
        r#"You are the Implementer. You write complete, idiomatic, production-ready code.
Respond with the code only, followed by a short note on assumptions."#
    }

    pub fn implement(directive: &str, context: &str) -> String {
        format!(
            r#"Implement the following:
{directive}
{context}"#
        )
    }

    pub fn quality_gate_system() -> &'static str {
        r#"You are the Quality Gate. You review work for correctness, safety and clarity.
Begin your answer with a single line: APPROVE or REJECT.
Then list the findings that justify the verdict."#
    }

    pub fn quality_review(subject: &str, material: &str) -> String {
        format!(
            r#"Review the following {subject}:

{material}

First line: APPROVE or REJECT."#
        )
    }

    pub fn verifier_system() -> &'static str {
        r#"You are the Verification Runner. You design and reason through verification
of a change: what to test, the expected results, and whether the evidence supports release.
Begin your answer with a single line: PASS or FAIL."#
    }

    pub fn verification(directive: &str, context: &str) -> String {
        format!(
            r#"Verify the following:
{directive}
{context}
List the checks performed and their results, after the PASS/FAIL line."#
        )
    }

    /// Render optional extra context as an indented block, or nothing.
    pub fn context_block(context: Option<&str>) -> String {
        match context.map(str::trim).filter(|c| !c.is_empty()) {
            Some(c) => format!("\nContext:\n{}\n", c),
            None => String::new(),
        }
    }
}
