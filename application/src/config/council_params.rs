//! Council parameters.

use serde::{Deserialize, Serialize};

/// Smallest council that can debate: a position needs at least one critic.
pub const MIN_QUORUM: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouncilParams {
    quorum: usize,
}

impl Default for CouncilParams {
    fn default() -> Self {
        Self { quorum: MIN_QUORUM }
    }
}

impl CouncilParams {
    /// Quorum below [`MIN_QUORUM`] is raised to it.
    pub fn with_quorum(quorum: usize) -> Self {
        Self {
            quorum: quorum.max(MIN_QUORUM),
        }
    }

    pub fn quorum(&self) -> usize {
        self.quorum
    }
}
