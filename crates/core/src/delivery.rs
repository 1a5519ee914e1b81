//! The rendered notification shape handed to the delivery sink.
//!
//! The sink (a background worker owning the OS/browser notification
//! surface) collapses notifications that share a `tag`, so tag
//! construction is part of the domain contract: one tag per
//! category-and-recipient for singles, one per category for grouped
//! summaries.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::category::Category;
use crate::types::{Timestamp, UserId};

/// Recipient segment used in tags for system-wide notifications.
pub const SYSTEM_RECIPIENT: &str = "system";

/// Payload `type` marker carried by grouped summary notifications.
pub const PAYLOAD_TYPE_SUMMARY: &str = "summary";

/// Collapse tag for a single (non-grouped) notification.
pub fn single_tag(category: Category, recipient: Option<&str>) -> String {
    format!("{}_{}", category, recipient.unwrap_or(SYSTEM_RECIPIENT))
}

/// Collapse tag for a grouped summary notification.
pub fn summary_tag(category: Category) -> String {
    format!("{category}_summary")
}

/// Body text for a grouped summary of `count` notifications.
pub fn summary_body(category: Category, count: usize) -> String {
    format!("{count} new {category} notifications")
}

/// The artifact the delivery sink renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveredNotification {
    /// OS-level collapse key; a new notification replaces any shown one
    /// with the same tag.
    pub tag: String,

    /// Whether replacing an existing notification with the same tag should
    /// re-alert the user. True only for security singles.
    pub renotify: bool,

    pub title: String,
    pub body: String,
    pub category: Category,

    /// Click-routing payload, including any grouping metadata.
    pub payload: Value,

    /// When the delivery was composed (UTC).
    pub timestamp: Timestamp,
}

impl DeliveredNotification {
    /// Compose a standalone delivery for a validated request.
    ///
    /// `payload` should already carry the merged `timestamp` and
    /// `recipientUserId` fields.
    pub fn single(
        category: Category,
        title: impl Into<String>,
        body: impl Into<String>,
        recipient: Option<&UserId>,
        payload: Value,
    ) -> Self {
        Self {
            tag: single_tag(category, recipient.map(String::as_str)),
            renotify: category == Category::Security,
            title: title.into(),
            body: body.into(),
            category,
            payload,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Compose a grouped summary for `item_ids.len()` notifications of one
    /// category.
    pub fn summary(category: Category, item_ids: Vec<Uuid>) -> Self {
        let count = item_ids.len();
        Self {
            tag: summary_tag(category),
            renotify: false,
            title: category.display_title().to_string(),
            body: summary_body(category, count),
            category,
            payload: serde_json::json!({
                "type": PAYLOAD_TYPE_SUMMARY,
                "category": category,
                "itemIds": item_ids,
            }),
            timestamp: chrono::Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
