//! Conversation context: messages and the token-bounded sliding window.

pub mod context_buffer;
pub mod message;

pub use context_buffer::{CHARS_PER_TOKEN, ContextBuffer, DEFAULT_TOKEN_BUDGET, estimate_tokens};
pub use message::{ContextMessage, Role};
