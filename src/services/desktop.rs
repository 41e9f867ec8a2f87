//! Desktop notifications through notify-send

use tokio::process::Command;
use tracing::{debug, info};

/// Milliseconds before a non-sticky notification closes itself
const AUTO_CLOSE_MS: u32 = 5000;

/// A single desktop notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopNotification {
    pub title: String,
    pub body: String,
    /// Replaces an earlier notification with the same tag
    pub tag: String,
    /// Stay on screen until dismissed
    pub require_interaction: bool,
}

impl DesktopNotification {
    /// Notification shown when the countdown finishes
    pub fn timer_completed() -> Self {
        Self {
            title: "タイマー完了！".to_string(),
            body: "タイマーが終了しました。".to_string(),
            tag: "timer-completed".to_string(),
            require_interaction: true,
        }
    }

    /// Notification shown when the warning window opens
    pub fn timer_warning(remaining_seconds: u32) -> Self {
        Self {
            title: "タイマー警告".to_string(),
            body: format!("残り{}秒です", remaining_seconds),
            tag: "timer-warning".to_string(),
            require_interaction: false,
        }
    }

    /// Arguments passed to notify-send
    pub fn args(&self) -> Vec<String> {
        let (urgency, expire_ms) = if self.require_interaction {
            ("critical", 0)
        } else {
            ("normal", AUTO_CLOSE_MS)
        };

        vec![
            "--app-name=web-timer".to_string(),
            format!("--urgency={}", urgency),
            format!("--expire-time={}", expire_ms),
            format!("--hint=string:x-canonical-private-synchronous:{}", self.tag),
            self.title.clone(),
            self.body.clone(),
        ]
    }
}

/// Show a desktop notification
pub async fn show_notification(notification: &DesktopNotification) -> Result<(), String> {
    debug!("Showing desktop notification: {}", notification.tag);

    let output = Command::new("notify-send")
        .args(notification.args())
        .output()
        .await
        .map_err(|e| format!("Failed to execute notify-send: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("notify-send failed: {}", stderr));
    }

    Ok(())
}

/// Check if notify-send is available on the system
pub async fn check_notify_send_available() -> Result<(), String> {
    Command::new("notify-send")
        .arg("--version")
        .output()
        .await
        .map_err(|_| "notify-send is not available, desktop notifications disabled".to_string())?;

    info!("notify-send is available");
    Ok(())
}
