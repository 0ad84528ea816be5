//! Prompt templates for the council debate

use crate::orchestration::debate::{Critique, Position};

/// Templates for generating prompts at each debate phase
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for a council member holding `role`
    pub fn councilor_system(name: &str, role: &str) -> String {
        format!(
            r#"You are {name}, a member of a deliberation council. Your role: {role}.
Argue from your role's perspective, but stay honest about uncertainty.
Be concise. Support claims with reasoning."#
        )
    }

    /// Divergence: form an independent position
    pub fn contemplate(topic: &str) -> String {
        format!(
            r#"The council is considering the following topic:

{topic}

State your independent position in a few paragraphs. Do not hedge toward what others might say."#
        )
    }

    /// Deliberation: critique another member's position
    pub fn critique(position: &str, author: &str) -> String {
        format!(
            r#"{author} submitted the following position:

--- {author} ---
{position}

Critique it. Name its strongest point, its weakest point, and what it overlooks."#
        )
    }

    /// Convergence: cast a final vote over the aggregate context
    pub fn vote(context: &str) -> String {
        format!(
            r#"{context}

Having read every position and critique above, cast your final vote: state the conclusion you support and the single most important reason."#
        )
    }

    /// Aggregate context shared by every member in the Convergence phase
    pub fn aggregate_context(topic: &str, positions: &[Position], critiques: &[Critique]) -> String {
        let mut context = format!("Topic: {}\n\nPositions:\n", topic);

        for position in positions {
            context.push_str(&format!(
                "\n--- {} ---\n{}\n",
                position.author,
                position.content.trim()
            ));
        }

        if !critiques.is_empty() {
            context.push_str("\nCritiques:\n");
            for critique in critiques {
                context.push_str(&format!(
                    "\n--- {} on {} ---\n{}\n",
                    critique.critic,
                    critique.target,
                    critique.content.trim()
                ));
            }
        }

        context
    }
}
