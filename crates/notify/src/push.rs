//! Push transport intake.
//!
//! The push service delivers an opaque JSON payload whose schema is owned
//! by the external transport. Decoding is strictly best-effort: anything
//! malformed, or missing the display text, is logged and dropped — a bad
//! payload must never crash the receiving worker or surface an error to
//! the transport layer.

use serde::Deserialize;
use serde_json::Value;

use pulse_core::{NotificationRequest, Priority};

/// Why a push payload was dropped.
#[derive(Debug, thiserror::Error)]
pub enum PushDecodeError {
    #[error("Malformed push payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Push payload missing field: {0}")]
    MissingField(&'static str),
}

/// The fields we understand in a push payload. Everything else is ignored.
#[derive(Debug, Deserialize)]
struct PushPayload {
    title: Option<String>,
    body: Option<String>,
    category: Option<String>,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    data: Value,
    #[serde(rename = "recipientUserId")]
    recipient_user_id: Option<String>,
}

/// Decode a raw push payload into a [`NotificationRequest`].
///
/// Title, body, and category are required; a payload without them carries
/// nothing displayable and is dropped. The resulting request still goes
/// through full dispatcher validation (the category here is not checked
/// against the known set).
pub fn decode_push_payload(raw: &[u8]) -> Result<NotificationRequest, PushDecodeError> {
    let payload: PushPayload = serde_json::from_slice(raw)?;

    let title = payload
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or(PushDecodeError::MissingField("title"))?;
    let body = payload
        .body
        .filter(|b| !b.trim().is_empty())
        .ok_or(PushDecodeError::MissingField("body"))?;
    let category = payload
        .category
        .ok_or(PushDecodeError::MissingField("category"))?;

    let mut request = NotificationRequest::new(title, body, category)
        .with_priority(payload.priority)
        .with_payload(if payload.data.is_object() {
            payload.data
        } else {
            Value::Object(Default::default())
        });
    request.recipient_user_id = payload.recipient_user_id;
    Ok(request)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn decodes_full_payload() {
        let raw = br#"{
            "title": "New message",
            "body": "Alice: hi",
            "category": "message",
            "priority": "high",
            "data": {"chatId": "c1"},
            "recipientUserId": "u1"
        }"#;

        let req = decode_push_payload(raw).expect("payload should decode");
        assert_eq!(req.title, "New message");
        assert_eq!(req.category, "message");
        assert_eq!(req.priority, Priority::High);
        assert_eq!(req.payload["chatId"], "c1");
        assert_eq!(req.recipient_user_id.as_deref(), Some("u1"));
    }

    #[test]
    fn priority_defaults_to_normal() {
        let raw = br#"{"title": "t", "body": "b", "category": "system"}"#;
        let req = decode_push_payload(raw).unwrap();
        assert_eq!(req.priority, Priority::Normal);
        assert!(req.payload.is_object());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert_matches!(
            decode_push_payload(b"not json"),
            Err(PushDecodeError::Malformed(_))
        );
    }

    #[test]
    fn missing_body_is_dropped() {
        let raw = br#"{"title": "t", "category": "message"}"#;
        assert_matches!(
            decode_push_payload(raw),
            Err(PushDecodeError::MissingField("body"))
        );
    }

    #[test]
    fn empty_body_is_dropped() {
        let raw = br#"{"title": "t", "body": "  ", "category": "message"}"#;
        assert_matches!(
            decode_push_payload(raw),
            Err(PushDecodeError::MissingField("body"))
        );
    }

    #[test]
    fn missing_title_is_dropped() {
        let raw = br#"{"body": "b", "category": "message"}"#;
        assert_matches!(
            decode_push_payload(raw),
            Err(PushDecodeError::MissingField("title"))
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let raw = br#"{"title": "t", "body": "b", "category": "system", "ttl": 60}"#;
        assert!(decode_push_payload(raw).is_ok());
    }

    #[test]
    fn non_object_data_is_replaced_with_empty_object() {
        let raw = br#"{"title": "t", "body": "b", "category": "system", "data": [1, 2]}"#;
        let req = decode_push_payload(raw).unwrap();
        assert!(req.payload.as_object().unwrap().is_empty());
    }

    #[test]
    fn bogus_category_decodes_but_fails_validation() {
        // Decoding passes the string through; the dispatcher rejects it.
        let raw = br#"{"title": "t", "body": "b", "category": "bogus"}"#;
        let req = decode_push_payload(raw).unwrap();
        assert!(req.validate().is_err());
    }
}
