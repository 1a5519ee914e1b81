//! Well-known notification action identifiers.
//!
//! These must match the action ids the delivery sink attaches to rendered
//! notifications and sends back in interaction events. Unknown action ids
//! are logged and ignored by the dispatcher.

/// Open an inline reply to the originating chat.
pub const ACTION_REPLY: &str = "reply";

/// Mark the originating item as read without navigating.
pub const ACTION_MARK_READ: &str = "mark_read";

/// Dismiss the notification with no further effect.
pub const ACTION_DISMISS: &str = "dismiss";

/// Navigate to the group the notification refers to.
pub const ACTION_VIEW_GROUP: &str = "view_group";

/// Accept a group invitation.
pub const ACTION_ACCEPT_INVITE: &str = "accept_invite";

/// All action ids the dispatcher handles.
pub const KNOWN_ACTIONS: &[&str] = &[
    ACTION_REPLY,
    ACTION_MARK_READ,
    ACTION_DISMISS,
    ACTION_VIEW_GROUP,
    ACTION_ACCEPT_INVITE,
];
