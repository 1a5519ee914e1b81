//! Bounded in-process record of dispatch decisions.
//!
//! The history is a debugging and introspection aid only: a fixed-capacity
//! ring buffer that drops its oldest entry on overflow and is lost on
//! process restart. It is the only place where a suppressed request is
//! distinguishable from a rejected one — the caller sees `false` either
//! way.

use std::collections::VecDeque;

use serde::Serialize;

use pulse_core::types::Timestamp;

/// Default ring buffer capacity.
pub const HISTORY_CAPACITY: usize = 100;

/// What the dispatcher did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// Sent to the sink on the immediate path.
    Delivered,
    /// Accepted into the batching queue.
    Queued,
    /// Blocked by the preference/DND gate.
    Suppressed,
    /// Failed validation (empty title or unknown category).
    Rejected,
}

/// One recorded dispatch decision.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub title: String,
    /// Category wire name as received (possibly invalid for rejections).
    pub category: String,
    pub outcome: DispatchOutcome,
    pub recorded_at: Timestamp,
}

impl HistoryEntry {
    pub fn new(title: impl Into<String>, category: impl Into<String>, outcome: DispatchOutcome) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            outcome,
            recorded_at: chrono::Utc::now(),
        }
    }
}

/// Fixed-capacity ring buffer of [`HistoryEntry`]s.
#[derive(Debug)]
pub struct DispatchHistory {
    capacity: usize,
    entries: VecDeque<HistoryEntry>,
}

impl DispatchHistory {
    /// Create a history with the given capacity (at least 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    /// Append an entry, dropping the oldest if at capacity.
    pub fn record(&mut self, entry: HistoryEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Snapshot the entries, oldest first.
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DispatchHistory {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
