//! In-memory per-user notification preference store.
//!
//! Thread-safe via interior `RwLock`; designed to be shared behind the
//! dispatcher. State lives only in process memory and resets on restart —
//! durable preference storage belongs to the surrounding application, not
//! this subsystem.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use pulse_core::prefs::{DndWindow, NotificationPreferences};
use pulse_core::types::UserId;
use pulse_core::Category;

/// A partial preference update.
///
/// Only the fields present are applied; per-category switches are merged
/// into the existing map rather than replacing it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferencesUpdate {
    /// Category switches to merge in.
    #[serde(default)]
    pub category_enabled: HashMap<Category, bool>,

    /// Replacement DND window, if present.
    #[serde(default)]
    pub dnd: Option<DndWindow>,
}

/// Holds every user's notification preferences.
#[derive(Default)]
pub struct PreferenceStore {
    users: RwLock<HashMap<UserId, NotificationPreferences>>,
}

impl PreferenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a user's preferences, or `None` if never configured.
    pub async fn get(&self, user_id: &str) -> Option<NotificationPreferences> {
        self.users.read().await.get(user_id).cloned()
    }

    /// Apply a partial update, creating default preferences for the user
    /// if none exist yet.
    pub async fn update(&self, user_id: &str, update: PreferencesUpdate) {
        let mut users = self.users.write().await;
        let prefs = users.entry(user_id.to_string()).or_default();

        prefs.category_enabled.extend(update.category_enabled);
        if let Some(dnd) = update.dnd {
            prefs.dnd = dnd;
        }
    }

    /// Replace a user's preferences wholesale.
    pub async fn set(&self, user_id: &str, prefs: NotificationPreferences) {
        self.users.write().await.insert(user_id.to_string(), prefs);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
