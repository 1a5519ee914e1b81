//! The fixed notification category taxonomy.
//!
//! Categories drive the default preference gate, the batching group key,
//! the collapse tag, and click routing. The set is closed: requests
//! carrying an unknown category string are rejected at the dispatcher
//! boundary, never silently accepted.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// All valid category wire names, in declaration order.
pub const VALID_CATEGORIES: &[&str] = &[
    "message",
    "group_invite",
    "mention",
    "file_share",
    "system",
    "security",
];

/// Notification class, fixed at six values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Direct or group chat message.
    Message,
    /// Invitation to join a group.
    GroupInvite,
    /// The recipient was @-mentioned in a message.
    Mention,
    /// A file was shared with the recipient.
    FileShare,
    /// Platform-wide announcement or maintenance notice.
    System,
    /// Security alert. Always re-alerts even when a notification with the
    /// same tag is already showing.
    Security,
}

impl Category {
    /// Parse a wire name into a category, or `None` for unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "message" => Some(Self::Message),
            "group_invite" => Some(Self::GroupInvite),
            "mention" => Some(Self::Mention),
            "file_share" => Some(Self::FileShare),
            "system" => Some(Self::System),
            "security" => Some(Self::Security),
            _ => None,
        }
    }

    /// Canonical wire name (matches the serde representation).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::GroupInvite => "group_invite",
            Self::Mention => "mention",
            Self::FileShare => "file_share",
            Self::System => "system",
            Self::Security => "security",
        }
    }

    /// Fixed human-readable title used for grouped summary notifications.
    pub fn display_title(self) -> &'static str {
        match self {
            Self::Message => "New Messages",
            Self::GroupInvite => "Group Invites",
            Self::Mention => "New Mentions",
            Self::FileShare => "Shared Files",
            Self::System => "System Notifications",
            Self::Security => "Security Alerts",
        }
    }

    /// All categories, in declaration order.
    pub fn all() -> [Category; 6] {
        [
            Self::Message,
            Self::GroupInvite,
            Self::Mention,
            Self::FileShare,
            Self::System,
            Self::Security,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate that a category string names one of the known categories.
pub fn validate_category(s: &str) -> Result<Category, CoreError> {
    Category::parse(s).ok_or_else(|| {
        CoreError::Validation(format!(
            "Unknown category: '{s}'. Valid categories: {}",
            VALID_CATEGORIES.join(", ")
        ))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_valid_names() {
        for name in VALID_CATEGORIES {
            assert!(Category::parse(name).is_some(), "should parse {name}");
        }
    }

    #[test]
    fn parse_round_trips_as_str() {
        for cat in Category::all() {
            assert_eq!(Category::parse(cat.as_str()), Some(cat));
        }
    }

    #[test]
    fn unknown_category_rejected() {
        assert!(Category::parse("bogus").is_none());
        assert!(Category::parse("").is_none());
        assert!(validate_category("bogus").is_err());
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!(Category::parse("Message").is_none());
        assert!(Category::parse("SECURITY").is_none());
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&Category::GroupInvite).unwrap();
        assert_eq!(json, "\"group_invite\"");
        let parsed: Category = serde_json::from_str("\"file_share\"").unwrap();
        assert_eq!(parsed, Category::FileShare);
    }

    #[test]
    fn every_category_has_a_display_title() {
        for cat in Category::all() {
            assert!(!cat.display_title().is_empty());
        }
    }
}
