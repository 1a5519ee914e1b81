//! Shared test fixtures: a recording delivery sink and dispatcher builders.
#![allow(dead_code)] // not every test binary uses every fixture

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use pulse_core::DeliveredNotification;
use pulse_notify::sink::SinkError;
use pulse_notify::{DeliverySink, DispatcherConfig, NotificationDispatcher};

/// A [`DeliverySink`] that records everything it is asked to do.
///
/// `fail_display` makes `display` return an error, for verifying that the
/// dispatcher swallows sink failures.
#[derive(Default)]
pub struct RecordingSink {
    pub displayed: Mutex<Vec<DeliveredNotification>>,
    pub badge_history: Mutex<Vec<u32>>,
    pub clear_count: AtomicUsize,
    pub fail_display: AtomicBool,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn displayed(&self) -> Vec<DeliveredNotification> {
        self.displayed.lock().await.clone()
    }

    pub async fn display_count(&self) -> usize {
        self.displayed.lock().await.len()
    }
}

#[async_trait]
impl DeliverySink for RecordingSink {
    async fn display(&self, notification: DeliveredNotification) -> Result<(), SinkError> {
        if self.fail_display.load(Ordering::SeqCst) {
            return Err(SinkError::from("display failed"));
        }
        self.displayed.lock().await.push(notification);
        Ok(())
    }

    async fn set_badge(&self, count: u32) -> Result<(), SinkError> {
        self.badge_history.lock().await.push(count);
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), SinkError> {
        self.clear_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Initialise test logging once, honoring `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Build a dispatcher over a fresh recording sink, with the clock pinned
/// to midday so no DND window interferes unless a test configures one.
pub fn test_dispatcher(config: DispatcherConfig) -> (NotificationDispatcher, Arc<RecordingSink>) {
    test_dispatcher_at_hour(config, 12)
}

/// Same as [`test_dispatcher`] but with an explicit local hour.
pub fn test_dispatcher_at_hour(
    config: DispatcherConfig,
    hour: u32,
) -> (NotificationDispatcher, Arc<RecordingSink>) {
    init_tracing();
    let sink = RecordingSink::new();
    let dispatcher =
        NotificationDispatcher::with_hour_source(sink.clone(), config, move || hour);
    (dispatcher, sink)
}

/// Let spawned dispatcher tasks (flush timers) run to completion on the
/// current-thread test runtime.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
