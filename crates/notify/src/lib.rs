//! Pulse notification dispatch runtime.
//!
//! This crate provides the in-process notification pipeline that sits
//! between application code (and the push transport) and the background
//! worker that owns the notification surface:
//!
//! - [`NotificationDispatcher`] — the entry point: validates requests,
//!   applies the preference/DND gate, and routes each accepted request
//!   down the immediate or batched path.
//! - [`BatchQueue`] — accumulates normal/low-priority notifications until
//!   a size threshold or delay timer triggers a flush.
//! - [`digest`] — collapses a flushed batch into standalone and grouped
//!   summary deliveries.
//! - [`DeliverySink`] — the boundary trait to the worker that renders
//!   notifications; [`ChannelSink`] bridges it over an mpsc channel.
//! - [`PreferenceStore`] — in-memory per-user preference state.
//! - [`DispatchHistory`] — bounded ring buffer of dispatch outcomes,
//!   reset on process restart.

pub mod digest;
pub mod dispatcher;
pub mod history;
pub mod interaction;
pub mod push;
pub mod queue;
pub mod sink;
pub mod store;

pub use dispatcher::{DispatcherConfig, NotificationDispatcher};
pub use history::{DispatchHistory, DispatchOutcome, HistoryEntry};
pub use interaction::InteractionEvent;
pub use queue::{BatchQueue, QueuedNotification};
pub use sink::{ChannelSink, DeliverySink, SinkCommand};
pub use store::{PreferenceStore, PreferencesUpdate};
