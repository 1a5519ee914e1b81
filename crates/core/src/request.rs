//! The dispatch input type and its validation rules.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::category::{validate_category, Category};
use crate::error::CoreError;
use crate::priority::Priority;
use crate::types::UserId;

/// A request to notify a user (or the whole system) about something.
///
/// The `category` field is carried as a string because requests arrive from
/// untrusted boundaries (push transport, application glue); it is validated
/// against the closed [`Category`] set at dispatch time rather than at
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequest {
    /// Required display title. Must be non-empty.
    pub title: String,

    /// Display body text.
    #[serde(default)]
    pub body: String,

    /// Category wire name, e.g. `"message"`. Validated at dispatch.
    pub category: String,

    /// Delivery urgency. Defaults to `normal`.
    #[serde(default)]
    pub priority: Priority,

    /// Opaque data forwarded to click routing (`groupId`, `chatId`,
    /// `messageId`, `url`, ...). Always a JSON object.
    #[serde(default = "empty_object")]
    pub payload: Value,

    /// Recipient for preference lookup; `None` means system-wide.
    #[serde(default)]
    pub recipient_user_id: Option<UserId>,
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}

impl NotificationRequest {
    /// Create a request with the given title, body, and category name.
    ///
    /// Priority defaults to `normal`, payload to an empty object.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            category: category.into(),
            priority: Priority::default(),
            payload: empty_object(),
            recipient_user_id: None,
        }
    }

    /// Set the delivery priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the opaque click-routing payload.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    /// Address the request to a specific recipient.
    pub fn with_recipient(mut self, user_id: impl Into<UserId>) -> Self {
        self.recipient_user_id = Some(user_id.into());
        self
    }

    /// Validate the request invariants and resolve the category.
    ///
    /// Rejects an empty (or whitespace-only) title and any category name
    /// outside the closed set.
    pub fn validate(&self) -> Result<Category, CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation(
                "Notification title must not be empty".to_string(),
            ));
        }
        validate_category(&self.category)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
