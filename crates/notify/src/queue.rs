//! The batching queue.
//!
//! Normal and low-priority notifications accumulate here until either the
//! size threshold is reached or the flush delay elapses, whichever comes
//! first. The queue has three logical states: idle (empty, no timer),
//! accumulating (timer armed, below threshold), and flushing.
//!
//! Flush correctness hinges on one invariant: draining is a
//! snapshot-and-clear under the lock, so an item can never be both part of
//! a flushed batch and still queued. A size-triggered flush cancels the
//! pending delay timer; a timer-triggered flush that finds the queue
//! already empty is a no-op and arms no new timer.

use serde_json::Value;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use pulse_core::types::{Timestamp, UserId};
use pulse_core::Category;

/// A notification waiting in the batching queue.
#[derive(Debug, Clone)]
pub struct QueuedNotification {
    /// Unique, time-ordered id (UUIDv7) for dedup and debugging.
    pub id: Uuid,
    pub category: Category,
    pub title: String,
    pub body: String,
    pub recipient: Option<UserId>,
    /// Merged click-routing payload (request payload + timestamp +
    /// recipient).
    pub payload: Value,
    pub enqueued_at: Timestamp,
}

/// Result of pushing an item into the queue.
#[derive(Debug)]
pub enum EnqueueOutcome {
    /// Still below the threshold. When `timer` is `Some`, the queue just
    /// left the idle state and the caller must arm the delay timer with
    /// this token.
    Accumulating { timer: Option<CancellationToken> },
    /// The push reached the size threshold; the batch was drained
    /// atomically and the pending timer cancelled. The caller must deliver
    /// the batch.
    ThresholdReached(Vec<QueuedNotification>),
}

struct QueueState {
    items: Vec<QueuedNotification>,
    /// Cancellation handle for the armed delay timer, if any.
    timer: Option<CancellationToken>,
}

/// Mutex-guarded accumulation buffer.
#[derive(Default)]
pub struct BatchQueue {
    state: Mutex<QueueState>,
}

impl Default for QueueState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            timer: None,
        }
    }
}

impl BatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item, draining the queue if `size_threshold` is reached.
    pub async fn push(
        &self,
        item: QueuedNotification,
        size_threshold: usize,
    ) -> EnqueueOutcome {
        let mut state = self.state.lock().await;
        state.items.push(item);

        if state.items.len() >= size_threshold {
            let batch = std::mem::take(&mut state.items);
            if let Some(timer) = state.timer.take() {
                timer.cancel();
            }
            return EnqueueOutcome::ThresholdReached(batch);
        }

        let timer = if state.timer.is_none() {
            let token = CancellationToken::new();
            state.timer = Some(token.clone());
            Some(token)
        } else {
            None
        };
        EnqueueOutcome::Accumulating { timer }
    }

    /// Snapshot-and-clear the queue, cancelling any pending timer.
    ///
    /// Returns an empty vec when the queue is already idle, which makes
    /// flushing idempotent.
    pub async fn drain(&self) -> Vec<QueuedNotification> {
        let mut state = self.state.lock().await;
        if let Some(timer) = state.timer.take() {
            timer.cancel();
        }
        std::mem::take(&mut state.items)
    }

    /// Number of items currently queued.
    pub async fn len(&self) -> usize {
        self.state.lock().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
