//! The delivery sink boundary.
//!
//! The dispatcher never renders notifications itself; it hands composed
//! [`DeliveredNotification`]s to a [`DeliverySink`], realized in production
//! by a background worker that owns the OS/browser notification surface.
//! Sink calls are fire-and-forget from the dispatcher's perspective:
//! errors are logged by the caller and never propagated to application
//! code.

use async_trait::async_trait;
use tokio::sync::mpsc;

use pulse_core::DeliveredNotification;

/// Errors crossing the sink boundary.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Boundary to whatever actually shows notifications to the user.
#[async_trait]
pub trait DeliverySink: Send + Sync {
    /// Render a notification. May complete before anything is shown.
    async fn display(&self, notification: DeliveredNotification) -> Result<(), SinkError>;

    /// Best-effort update of the app badge counter.
    async fn set_badge(&self, count: u32) -> Result<(), SinkError>;

    /// Dismiss every currently shown notification.
    async fn clear_all(&self) -> Result<(), SinkError>;
}

// ---------------------------------------------------------------------------
// ChannelSink
// ---------------------------------------------------------------------------

/// A command posted to the worker that owns the notification surface.
#[derive(Debug, Clone)]
pub enum SinkCommand {
    Display(DeliveredNotification),
    SetBadge(u32),
    ClearAll,
}

/// Channel sender half for posting commands to the notification worker.
pub type SinkSender = mpsc::UnboundedSender<SinkCommand>;

/// [`DeliverySink`] implementation that posts commands over an unbounded
/// mpsc channel to a worker task.
///
/// The receiver half is returned by [`ChannelSink::new`]; the worker side
/// drains it and talks to the platform notification API.
pub struct ChannelSink {
    sender: SinkSender,
}

impl ChannelSink {
    /// Create a sink and the receiver the worker should drain.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SinkCommand>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    fn post(&self, command: SinkCommand) -> Result<(), SinkError> {
        self.sender
            .send(command)
            .map_err(|_| SinkError::from("notification worker channel closed"))
    }
}

#[async_trait]
impl DeliverySink for ChannelSink {
    async fn display(&self, notification: DeliveredNotification) -> Result<(), SinkError> {
        self.post(SinkCommand::Display(notification))
    }

    async fn set_badge(&self, count: u32) -> Result<(), SinkError> {
        self.post(SinkCommand::SetBadge(count))
    }

    async fn clear_all(&self) -> Result<(), SinkError> {
        self.post(SinkCommand::ClearAll)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pulse_core::Category;

    #[tokio::test]
    async fn display_posts_to_worker_channel() {
        let (sink, mut rx) = ChannelSink::new();
        let n = DeliveredNotification::single(
            Category::Message,
            "Hi",
            "body",
            None,
            serde_json::json!({}),
        );

        sink.display(n).await.expect("send should succeed");

        let cmd = rx.recv().await.expect("worker should receive the command");
        assert_matches!(cmd, SinkCommand::Display(n) if n.title == "Hi");
    }

    #[tokio::test]
    async fn badge_and_clear_commands() {
        let (sink, mut rx) = ChannelSink::new();
        sink.set_badge(3).await.unwrap();
        sink.clear_all().await.unwrap();

        assert_matches!(rx.recv().await, Some(SinkCommand::SetBadge(3)));
        assert_matches!(rx.recv().await, Some(SinkCommand::ClearAll));
    }

    #[tokio::test]
    async fn closed_worker_channel_is_an_error() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        assert!(sink.set_badge(0).await.is_err());
    }
}
