//! Notification preferences

use serde::{Deserialize, Serialize};

/// Which notification channels are enabled.
///
/// Held in memory only; every field defaults to enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    /// Terminal bell alerts
    pub enable_audio: bool,
    /// Desktop notifications through `notify-send`
    pub enable_desktop_notification: bool,
    /// Log lines for the completion and warning events
    pub enable_visual_notification: bool,
}

impl NotificationSettings {
    /// All channels enabled
    pub fn new() -> Self {
        Self {
            enable_audio: true,
            enable_desktop_notification: true,
            enable_visual_notification: true,
        }
    }

    /// Whether any channel is enabled
    pub fn any_enabled(&self) -> bool {
        self.enable_audio || self.enable_desktop_notification || self.enable_visual_notification
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self::new()
    }
}
