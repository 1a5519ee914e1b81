//! Notification priority levels.

use serde::{Deserialize, Serialize};

/// Delivery urgency for a notification request.
///
/// Only [`Priority::High`] takes the immediate delivery path and bypasses
/// an active Do-Not-Disturb window; `Normal` and `Low` are accumulated in
/// the batching queue and delivered grouped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Delivered immediately; bypasses DND.
    High,
    /// Batched. Default.
    #[default]
    Normal,
    /// Batched.
    Low,
}

impl Priority {
    /// Whether this priority skips the batching queue.
    pub fn is_immediate(self) -> bool {
        matches!(self, Self::High)
    }
}
