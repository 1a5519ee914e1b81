//! The notification dispatcher.
//!
//! One dispatcher instance per process. Every notification request —
//! whether from application code or decoded off the push transport — goes
//! through the same path: validate, gate on preferences and DND, then
//! either deliver immediately (high priority) or hand to the batching
//! queue. Sink failures are logged and swallowed; the dispatcher's
//! contract ends at "accepted for delivery", not "confirmed displayed".

use std::sync::Arc;
use std::time::Duration;

use chrono::Timelike;
use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;

use pulse_core::prefs::should_deliver;
use pulse_core::{Category, DeliveredNotification, NotificationRequest};

use crate::digest::group_into_deliveries;
use crate::history::{DispatchHistory, DispatchOutcome, HistoryEntry};
use crate::interaction::{resolve_interaction, InteractionEvent};
use crate::push::decode_push_payload;
use crate::queue::{BatchQueue, EnqueueOutcome, QueuedNotification};
use crate::sink::DeliverySink;
use crate::store::{PreferenceStore, PreferencesUpdate};

/// Default batch size threshold.
const DEFAULT_BATCH_SIZE: usize = 10;

/// Default flush delay.
const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(5000);

/// Source of the current local hour, swappable so tests can pin the clock.
type HourSource = Arc<dyn Fn() -> u32 + Send + Sync>;

// ---------------------------------------------------------------------------
// DispatcherConfig
// ---------------------------------------------------------------------------

/// Batching configuration supplied at dispatcher construction.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Queue size that forces an immediate flush (default: `10`).
    pub batch_size: usize,
    /// How long the queue accumulates before a timed flush (default: `5000` ms).
    pub batch_delay: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
        }
    }
}

impl DispatcherConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default |
    /// |------------------------|---------|
    /// | `NOTIFY_BATCH_SIZE`    | `10`    |
    /// | `NOTIFY_BATCH_DELAY_MS`| `5000`  |
    pub fn from_env() -> Self {
        let batch_size: usize = std::env::var("NOTIFY_BATCH_SIZE")
            .unwrap_or_else(|_| DEFAULT_BATCH_SIZE.to_string())
            .parse()
            .expect("NOTIFY_BATCH_SIZE must be a valid usize");

        let batch_delay_ms: u64 = std::env::var("NOTIFY_BATCH_DELAY_MS")
            .unwrap_or_else(|_| DEFAULT_BATCH_DELAY.as_millis().to_string())
            .parse()
            .expect("NOTIFY_BATCH_DELAY_MS must be a valid u64");

        Self {
            batch_size: batch_size.max(1),
            batch_delay: Duration::from_millis(batch_delay_ms),
        }
    }
}

// ---------------------------------------------------------------------------
// NotificationDispatcher
// ---------------------------------------------------------------------------

struct DispatcherInner {
    config: DispatcherConfig,
    prefs: PreferenceStore,
    sink: Arc<dyn DeliverySink>,
    queue: BatchQueue,
    history: Mutex<DispatchHistory>,
    local_hour: HourSource,
}

/// The notification pipeline entry point.
///
/// Cheap to clone; clones share all state. Construct with an injected
/// [`DeliverySink`] so tests can substitute a recording fake.
#[derive(Clone)]
pub struct NotificationDispatcher {
    inner: Arc<DispatcherInner>,
}

impl NotificationDispatcher {
    /// Create a dispatcher using the wall clock for DND checks.
    pub fn new(sink: Arc<dyn DeliverySink>, config: DispatcherConfig) -> Self {
        Self::with_hour_source(sink, config, || chrono::Local::now().hour())
    }

    /// Create a dispatcher with an explicit local-hour source.
    pub fn with_hour_source(
        sink: Arc<dyn DeliverySink>,
        config: DispatcherConfig,
        local_hour: impl Fn() -> u32 + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(DispatcherInner {
                config,
                prefs: PreferenceStore::new(),
                sink,
                queue: BatchQueue::new(),
                history: Mutex::new(DispatchHistory::default()),
                local_hour: Arc::new(local_hour),
            }),
        }
    }

    /// Dispatch a notification request.
    ///
    /// Returns whether the request was accepted for delivery: `false` for
    /// an invalid request (unknown category, empty title) or one blocked
    /// by the recipient's preferences or DND window. Never errors — a
    /// malformed notification must not crash the caller.
    pub async fn send_notification(&self, request: &NotificationRequest) -> bool {
        let category = match request.validate() {
            Ok(category) => category,
            Err(e) => {
                tracing::warn!(error = %e, title = %request.title, "Rejected notification");
                self.record(request, DispatchOutcome::Rejected).await;
                return false;
            }
        };

        let prefs = match &request.recipient_user_id {
            Some(user_id) => self.inner.prefs.get(user_id).await,
            None => None,
        };
        let hour = (self.inner.local_hour)();
        if !should_deliver(prefs.as_ref(), category, request.priority, hour) {
            tracing::debug!(
                category = %category,
                recipient = request.recipient_user_id.as_deref().unwrap_or("system"),
                "Notification suppressed by preferences"
            );
            self.record(request, DispatchOutcome::Suppressed).await;
            return false;
        }

        let payload = merge_payload(request);

        if request.priority.is_immediate() {
            let notification = DeliveredNotification::single(
                category,
                request.title.clone(),
                request.body.clone(),
                request.recipient_user_id.as_ref(),
                payload,
            );
            self.deliver(notification).await;
            self.record(request, DispatchOutcome::Delivered).await;
        } else {
            self.enqueue(category, request, payload).await;
            self.record(request, DispatchOutcome::Queued).await;
        }

        true
    }

    /// Flush the batching queue now.
    ///
    /// Idempotent: flushing an empty queue delivers nothing.
    pub async fn flush(&self) {
        let batch = self.inner.queue.drain().await;
        self.deliver_batch(batch).await;
    }

    /// Apply a partial preference update for a user.
    pub async fn update_preferences(&self, user_id: &str, update: PreferencesUpdate) {
        self.inner.prefs.update(user_id, update).await;
    }

    /// Dismiss all shown notifications and reset the badge counter.
    ///
    /// Best-effort: sink failures are logged and swallowed.
    pub async fn clear_all(&self) {
        if let Err(e) = self.inner.sink.clear_all().await {
            tracing::error!(error = %e, "Failed to clear notifications");
        }
        if let Err(e) = self.inner.sink.set_badge(0).await {
            tracing::error!(error = %e, "Failed to reset badge counter");
        }
    }

    /// Handle an opaque payload from the push transport.
    ///
    /// Decode failures (including a payload without display text) are
    /// logged and dropped; nothing propagates to the transport layer.
    /// Returns whether the decoded request was accepted for delivery.
    pub async fn on_push_received(&self, raw: &[u8]) -> bool {
        match decode_push_payload(raw) {
            Ok(request) => self.send_notification(&request).await,
            Err(e) => {
                tracing::warn!(error = %e, "Dropped push payload");
                false
            }
        }
    }

    /// Handle a user-interaction event from the delivery sink.
    ///
    /// Returns the navigation target the client should open, or `None`
    /// when the interaction completes without navigating.
    pub fn on_notification_clicked(&self, event: &InteractionEvent) -> Option<String> {
        resolve_interaction(event)
    }

    /// Snapshot the dispatch history, oldest first. Debug aid only.
    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.inner.history.lock().await.snapshot()
    }

    /// Number of notifications currently awaiting a batched flush.
    pub async fn pending_count(&self) -> usize {
        self.inner.queue.len().await
    }

    // -- internals -----------------------------------------------------------

    async fn enqueue(&self, category: Category, request: &NotificationRequest, payload: Value) {
        let item = QueuedNotification {
            id: Uuid::now_v7(),
            category,
            title: request.title.clone(),
            body: request.body.clone(),
            recipient: request.recipient_user_id.clone(),
            payload,
            enqueued_at: chrono::Utc::now(),
        };

        match self.inner.queue.push(item, self.inner.config.batch_size).await {
            EnqueueOutcome::ThresholdReached(batch) => {
                self.deliver_batch(batch).await;
            }
            EnqueueOutcome::Accumulating { timer: Some(token) } => {
                // The queue just left idle: arm the delay timer. The token
                // is cancelled by a size-triggered or manual flush.
                let inner = Arc::clone(&self.inner);
                let delay = self.inner.config.batch_delay;
                tokio::spawn(async move {
                    tokio::select! {
                        _ = token.cancelled() => {}
                        _ = tokio::time::sleep(delay) => {
                            let batch = inner.queue.drain().await;
                            deliver_batch_inner(&inner, batch).await;
                        }
                    }
                });
            }
            EnqueueOutcome::Accumulating { timer: None } => {}
        }
    }

    async fn deliver(&self, notification: DeliveredNotification) {
        deliver_inner(&self.inner, notification).await;
    }

    async fn deliver_batch(&self, batch: Vec<QueuedNotification>) {
        deliver_batch_inner(&self.inner, batch).await;
    }

    async fn record(&self, request: &NotificationRequest, outcome: DispatchOutcome) {
        self.inner
            .history
            .lock()
            .await
            .record(HistoryEntry::new(&request.title, &request.category, outcome));
    }
}

/// Merge the request payload with the delivery metadata the click router
/// and sink need (`timestamp`, `recipientUserId`).
fn merge_payload(request: &NotificationRequest) -> Value {
    let mut payload = request.payload.clone();
    if let Some(map) = payload.as_object_mut() {
        map.insert(
            "timestamp".to_string(),
            Value::String(chrono::Utc::now().to_rfc3339()),
        );
        map.insert(
            "recipientUserId".to_string(),
            match &request.recipient_user_id {
                Some(id) => Value::String(id.clone()),
                None => Value::Null,
            },
        );
    }
    payload
}

async fn deliver_inner(inner: &DispatcherInner, notification: DeliveredNotification) {
    let tag = notification.tag.clone();
    if let Err(e) = inner.sink.display(notification).await {
        tracing::error!(error = %e, tag = %tag, "Delivery sink rejected notification");
    }
}

async fn deliver_batch_inner(inner: &DispatcherInner, batch: Vec<QueuedNotification>) {
    if batch.is_empty() {
        return;
    }
    let count = batch.len();
    let deliveries = group_into_deliveries(batch);
    tracing::debug!(
        queued = count,
        deliveries = deliveries.len(),
        "Flushing notification batch"
    );
    for notification in deliveries {
        deliver_inner(inner, notification).await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
