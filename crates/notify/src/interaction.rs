//! Handling of user interaction events from the delivery sink.
//!
//! A plain click resolves through the click router; a click on a
//! notification action button dispatches through a fixed action table.
//! Unknown actions are logged and ignored — the sink may ship newer action
//! ids than this process understands.

use serde::Deserialize;
use serde_json::Value;

use pulse_core::actions;
use pulse_core::routing::resolve_target;
use pulse_core::Category;

/// An interaction event posted back by the delivery sink.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionEvent {
    /// Category wire name of the clicked notification.
    pub category: String,

    /// Action button id, or `None` for a plain click on the body.
    #[serde(default)]
    pub action: Option<String>,

    /// The clicked notification's payload.
    #[serde(default)]
    pub payload: Value,
}

/// Resolve an interaction to a navigation target, if any.
///
/// Returns `None` for actions that complete without navigation
/// (`mark_read`, `dismiss`) and for unknown actions.
pub fn resolve_interaction(event: &InteractionEvent) -> Option<String> {
    if let Some(action) = event.action.as_deref() {
        return resolve_action(action, &event.payload);
    }

    // Plain click: route by category. A category we no longer recognise
    // still navigates somewhere sensible.
    let target = match Category::parse(&event.category) {
        Some(category) => resolve_target(category, &event.payload),
        None => {
            tracing::warn!(
                category = %event.category,
                "Click on notification with unknown category"
            );
            pulse_core::routing::DEFAULT_TARGET.to_string()
        }
    };
    Some(target)
}

fn resolve_action(action: &str, payload: &Value) -> Option<String> {
    let group_target = || {
        payload
            .get("groupId")
            .and_then(Value::as_str)
            .map(|id| format!("/groups/{id}"))
    };

    match action {
        actions::ACTION_REPLY => {
            // Reply opens the originating conversation.
            Some(resolve_target(Category::Message, payload))
        }
        actions::ACTION_MARK_READ | actions::ACTION_DISMISS => None,
        actions::ACTION_VIEW_GROUP | actions::ACTION_ACCEPT_INVITE => group_target(),
        other => {
            tracing::warn!(action = other, "Ignoring unknown notification action");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn click(category: &str, payload: Value) -> InteractionEvent {
        InteractionEvent {
            category: category.to_string(),
            action: None,
            payload,
        }
    }

    fn action(id: &str, payload: Value) -> InteractionEvent {
        InteractionEvent {
            category: "message".to_string(),
            action: Some(id.to_string()),
            payload,
        }
    }

    #[test]
    fn plain_click_routes_by_category() {
        let event = click("mention", json!({"groupId": "g1", "messageId": "m1"}));
        assert_eq!(
            resolve_interaction(&event).as_deref(),
            Some("/groups/g1?message=m1")
        );
    }

    #[test]
    fn plain_click_unknown_category_defaults() {
        let event = click("legacy_kind", json!({}));
        assert_eq!(resolve_interaction(&event).as_deref(), Some("/notifications"));
    }

    #[test]
    fn reply_opens_the_conversation() {
        let event = action("reply", json!({"chatId": "c9"}));
        assert_eq!(resolve_interaction(&event).as_deref(), Some("/chat/c9"));
    }

    #[test]
    fn mark_read_and_dismiss_do_not_navigate() {
        assert!(resolve_interaction(&action("mark_read", json!({"chatId": "c9"}))).is_none());
        assert!(resolve_interaction(&action("dismiss", json!({}))).is_none());
    }

    #[test]
    fn view_group_and_accept_invite_navigate_to_group() {
        let event = action("view_group", json!({"groupId": "g7"}));
        assert_eq!(resolve_interaction(&event).as_deref(), Some("/groups/g7"));

        let event = action("accept_invite", json!({"groupId": "g8"}));
        assert_eq!(resolve_interaction(&event).as_deref(), Some("/groups/g8"));
    }

    #[test]
    fn group_actions_without_group_id_do_nothing() {
        assert!(resolve_interaction(&action("view_group", json!({}))).is_none());
    }

    #[test]
    fn unknown_action_is_ignored() {
        assert!(resolve_interaction(&action("snooze", json!({}))).is_none());
    }

    #[test]
    fn event_deserializes_with_defaults() {
        let event: InteractionEvent =
            serde_json::from_str(r#"{"category": "system"}"#).unwrap();
        assert!(event.action.is_none());
        assert_eq!(resolve_interaction(&event).as_deref(), Some("/notifications"));
    }
}
