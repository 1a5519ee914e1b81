//! Click-to-navigation target resolution.
//!
//! Maps a delivered notification's category and payload to the in-app
//! location the client should open when the user clicks it. Pure and
//! deterministic; an explicit `url` in the payload always wins over
//! category inference.

use serde_json::Value;

use crate::category::Category;

/// Fallback target when no more specific route applies.
pub const DEFAULT_TARGET: &str = "/notifications";

/// Target for security alerts.
pub const SECURITY_TARGET: &str = "/admin/security";

/// Resolve the navigation target for a clicked notification.
///
/// Precedence:
/// 1. `payload.url` verbatim, if present.
/// 2. Category inference:
///    - `message` → `/groups/{groupId}` or `/chat/{chatId}`
///    - `group_invite` → `/groups/{groupId}`
///    - `mention` → `/groups/{groupId}?message={messageId}`
///    - `security` → `/admin/security`
/// 3. [`DEFAULT_TARGET`] for everything else, including inference cases
///    whose payload lacks the expected ids.
pub fn resolve_target(category: Category, payload: &Value) -> String {
    if let Some(url) = payload.get("url").and_then(Value::as_str) {
        return url.to_string();
    }

    let str_field = |key: &str| payload.get(key).and_then(Value::as_str);

    match category {
        Category::Message => {
            if let Some(group_id) = str_field("groupId") {
                format!("/groups/{group_id}")
            } else if let Some(chat_id) = str_field("chatId") {
                format!("/chat/{chat_id}")
            } else {
                DEFAULT_TARGET.to_string()
            }
        }
        Category::GroupInvite => match str_field("groupId") {
            Some(group_id) => format!("/groups/{group_id}"),
            None => DEFAULT_TARGET.to_string(),
        },
        Category::Mention => match (str_field("groupId"), str_field("messageId")) {
            (Some(group_id), Some(message_id)) => {
                format!("/groups/{group_id}?message={message_id}")
            }
            _ => DEFAULT_TARGET.to_string(),
        },
        Category::Security => SECURITY_TARGET.to_string(),
        Category::FileShare | Category::System => DEFAULT_TARGET.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
