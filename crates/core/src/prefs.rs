//! Per-user notification preferences and the delivery gate.
//!
//! The gate is a pure function of the stored preferences, the request's
//! category and priority, and the current local hour. Absence of stored
//! preferences must never block delivery: an unconfigured user gets every
//! notification.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::priority::Priority;

/// A daily Do-Not-Disturb window in local hours.
///
/// The window may wrap past midnight, e.g. `start_hour = 22, end_hour = 8`
/// covers 22:00–08:00. The start hour is inclusive, the end hour exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DndWindow {
    pub enabled: bool,
    /// First suppressed hour, 0–23.
    pub start_hour: u32,
    /// First hour past the window, 0–23.
    pub end_hour: u32,
}

impl DndWindow {
    /// Whether `hour` falls inside the window, handling midnight wraparound.
    pub fn contains(&self, hour: u32) -> bool {
        if self.start_hour <= self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

/// A user's notification configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationPreferences {
    /// Per-category opt-out switches. Categories absent from the map are
    /// enabled; only an explicit `false` blocks.
    #[serde(default)]
    pub category_enabled: HashMap<Category, bool>,

    /// Do-Not-Disturb window.
    #[serde(default)]
    pub dnd: DndWindow,
}

impl NotificationPreferences {
    /// Whether the given category is enabled (default true).
    pub fn is_category_enabled(&self, category: Category) -> bool {
        self.category_enabled.get(&category).copied().unwrap_or(true)
    }
}

/// Decide whether a notification should be delivered.
///
/// Rules, in order:
/// 1. No stored preferences → allow.
/// 2. Category explicitly disabled → block.
/// 3. DND active and `local_hour` inside the window → allow only `high`.
/// 4. Otherwise allow.
pub fn should_deliver(
    prefs: Option<&NotificationPreferences>,
    category: Category,
    priority: Priority,
    local_hour: u32,
) -> bool {
    let Some(prefs) = prefs else {
        return true;
    };

    if !prefs.is_category_enabled(category) {
        return false;
    }

    if prefs.dnd.enabled && prefs.dnd.contains(local_hour) {
        return priority == Priority::High;
    }

    true
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
