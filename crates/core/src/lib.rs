//! Pulse notification domain logic.
//!
//! This crate holds the pure, dependency-free pieces of the notification
//! pipeline so they can be used by both the dispatcher runtime and any
//! future worker or CLI tooling:
//!
//! - [`Category`] / [`Priority`] — the fixed notification taxonomy.
//! - [`NotificationRequest`] — the validated dispatch input.
//! - [`prefs`] — per-user preferences and the Do-Not-Disturb gate.
//! - [`routing`] — click-to-navigation target resolution.
//! - [`delivery`] — the rendered notification shape and tag/summary rules.
//! - [`actions`] — well-known interaction action ids.

pub mod actions;
pub mod category;
pub mod delivery;
pub mod error;
pub mod prefs;
pub mod priority;
pub mod request;
pub mod routing;
pub mod types;

pub use category::Category;
pub use delivery::DeliveredNotification;
pub use error::CoreError;
pub use prefs::{DndWindow, NotificationPreferences};
pub use priority::Priority;
pub use request::NotificationRequest;
