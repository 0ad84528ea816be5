//! Sliding-window conversation buffer bounded by an estimated token budget.
//!
//! [`ContextBuffer`] keeps one distinguished system message plus an ordered
//! list of user/assistant turns. Whenever the estimated total exceeds the
//! budget, the oldest turns are evicted until it fits again or no turns
//! remain. The system message is a hard floor and is never evicted, so a
//! system prompt that alone exceeds the budget leaves the buffer over budget
//! with zero turns.
//!
//! Token counts use a crude `ceil(chars / 4)` estimate; no tokenizer is
//! consulted.

use super::message::{ContextMessage, Role};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default budget in estimated tokens.
pub const DEFAULT_TOKEN_BUDGET: usize = 4000;

/// Characters assumed per token by [`estimate_tokens`].
pub const CHARS_PER_TOKEN: usize = 4;

/// Estimate the token count of `text` as `ceil(chars / 4)`.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// Token-bounded conversation window.
///
/// # Example
///
/// ```
/// use conclave_domain::{ContextBuffer, ContextMessage};
///
/// let mut buffer = ContextBuffer::with_budget("S", 10);
/// buffer.add(ContextMessage::user("a".repeat(10)));
/// buffer.add(ContextMessage::assistant("b".repeat(20)));
/// buffer.add(ContextMessage::user("c".repeat(10)));
///
/// // the first turn was evicted to stay within 10 tokens
/// assert_eq!(buffer.context().len(), 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextBuffer {
    system: ContextMessage,
    turns: VecDeque<ContextMessage>,
    budget: usize,
}

impl Default for ContextBuffer {
    fn default() -> Self {
        Self::new("")
    }
}

impl ContextBuffer {
    /// Create a buffer with the default budget.
    pub fn new(system_instruction: impl Into<String>) -> Self {
        Self::with_budget(system_instruction, DEFAULT_TOKEN_BUDGET)
    }

    /// Create a buffer with an explicit token budget.
    pub fn with_budget(system_instruction: impl Into<String>, budget: usize) -> Self {
        Self {
            system: ContextMessage::system(system_instruction),
            turns: VecDeque::new(),
            budget,
        }
    }

    /// Append a message and prune.
    ///
    /// A system-role message replaces the system instruction rather than
    /// becoming a turn, keeping the system message a singleton.
    pub fn add(&mut self, message: ContextMessage) {
        if message.role == Role::System {
            self.update_system_instruction(message.content);
            return;
        }
        self.turns.push_back(message);
        self.prune();
    }

    /// Evict the oldest turns until the estimate fits the budget or no turns
    /// remain. Returns the number of evicted turns.
    pub fn prune(&mut self) -> usize {
        let mut total = self.estimated_tokens();
        let mut evicted = 0;
        while total > self.budget {
            let Some(oldest) = self.turns.pop_front() else {
                break;
            };
            total -= estimate_tokens(&oldest.content);
            evicted += 1;
        }
        evicted
    }

    /// Replace the system instruction and re-prune.
    ///
    /// A longer instruction can force eviction of turns.
    pub fn update_system_instruction(&mut self, text: impl Into<String>) -> usize {
        self.system.content = text.into();
        self.prune()
    }

    /// Snapshot of `[system, ...turns]`.
    pub fn context(&self) -> Vec<ContextMessage> {
        std::iter::once(self.system.clone())
            .chain(self.turns.iter().cloned())
            .collect()
    }

    /// Turns only, oldest first.
    pub fn turns(&self) -> impl Iterator<Item = &ContextMessage> {
        self.turns.iter()
    }

    /// Drop every turn, keeping the system message.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn system_instruction(&self) -> &str {
        &self.system.content
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Estimated tokens of the system message plus every turn.
    pub fn estimated_tokens(&self) -> usize {
        estimate_tokens(&self.system.content)
            + self
                .turns
                .iter()
                .map(|m| estimate_tokens(&m.content))
                .sum::<usize>()
    }

    pub fn is_over_budget(&self) -> bool {
        self.estimated_tokens() > self.budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("S"), 1);
        assert_eq!(estimate_tokens(&"x".repeat(10)), 3);
        assert_eq!(estimate_tokens(&"x".repeat(20)), 5);
        // counted in chars, not bytes
        assert_eq!(estimate_tokens("あいうえ"), 1);
    }

    #[test]
    fn test_sliding_window_evicts_oldest() {
        let mut buffer = ContextBuffer::with_budget("S", 10);
        let msg1 = "1".repeat(10);
        let msg2 = "2".repeat(20);
        let msg3 = "3".repeat(10);

        buffer.add(ContextMessage::user(msg1));
        buffer.add(ContextMessage::assistant(msg2.clone()));
        buffer.add(ContextMessage::user(msg3.clone()));

        let context = buffer.context();
        assert_eq!(context.len(), 3);
        assert_eq!(context[0], ContextMessage::system("S"));
        assert_eq!(context[1].content, msg2);
        assert_eq!(context[2].content, msg3);
        assert!(!buffer.is_over_budget());
    }

    #[test]
    fn test_within_budget_keeps_everything() {
        let mut buffer = ContextBuffer::new("You are helpful.");
        buffer.add(ContextMessage::user("hi"));
        buffer.add(ContextMessage::assistant("hello"));
        assert_eq!(buffer.turn_count(), 2);
        assert_eq!(buffer.budget(), DEFAULT_TOKEN_BUDGET);
    }

    #[test]
    fn test_system_message_is_never_pruned() {
        let long_system = "s".repeat(100); // 25 tokens
        let mut buffer = ContextBuffer::with_budget(long_system.clone(), 10);
        buffer.add(ContextMessage::user("hello"));

        let context = buffer.context();
        assert_eq!(context.len(), 1);
        assert_eq!(context[0].content, long_system);
        // accepted: the system floor alone exceeds the budget
        assert!(buffer.is_over_budget());
    }

    #[test]
    fn test_update_system_instruction_reprunes() {
        let mut buffer = ContextBuffer::with_budget("S", 10);
        buffer.add(ContextMessage::user("a".repeat(12))); // 3
        buffer.add(ContextMessage::assistant("b".repeat(12))); // 3
        assert_eq!(buffer.turn_count(), 2);

        let evicted = buffer.update_system_instruction("x".repeat(20)); // 5
        assert_eq!(evicted, 1);
        assert_eq!(buffer.turn_count(), 1);
        assert_eq!(buffer.system_instruction(), "x".repeat(20));
    }

    #[test]
    fn test_adding_system_role_replaces_instruction() {
        let mut buffer = ContextBuffer::new("old");
        buffer.add(ContextMessage::system("new"));
        assert_eq!(buffer.turn_count(), 0);
        assert_eq!(buffer.context(), vec![ContextMessage::system("new")]);
    }

    #[test]
    fn test_clear_keeps_system() {
        let mut buffer = ContextBuffer::new("sys");
        buffer.add(ContextMessage::user("q"));
        buffer.add(ContextMessage::assistant("a"));
        buffer.clear();
        assert_eq!(buffer.context(), vec![ContextMessage::system("sys")]);
    }

    #[test]
    fn test_single_oversized_turn_is_evicted() {
        let mut buffer = ContextBuffer::with_budget("S", 4);
        buffer.add(ContextMessage::user("z".repeat(40)));
        assert_eq!(buffer.turn_count(), 0);
        assert_eq!(buffer.estimated_tokens(), 1);
    }

    #[test]
    fn test_context_is_a_snapshot() {
        let mut buffer = ContextBuffer::new("sys");
        buffer.add(ContextMessage::user("q"));
        let mut snapshot = buffer.context();
        snapshot.clear();
        assert_eq!(buffer.context().len(), 2);
    }
}
