//! Notifier backed by the terminal bell and desktop notifications

use std::sync::{Arc, Mutex};

use futures::future::{self, BoxFuture, FutureExt};
use tracing::{debug, info, warn};

use super::{
    audio::{play_timer_alert, play_warning_beep},
    desktop::{check_notify_send_available, show_notification, DesktopNotification},
    notifier::Notifier,
};
use crate::state::{NotificationSettings, WARNING_THRESHOLD_SECONDS};

/// Notifier that honors the shared notification settings
#[derive(Debug, Clone)]
pub struct SystemNotifier {
    settings: Arc<Mutex<NotificationSettings>>,
}

impl SystemNotifier {
    pub fn new(settings: Arc<Mutex<NotificationSettings>>) -> Self {
        Self { settings }
    }

    fn settings(&self) -> NotificationSettings {
        match self.settings.lock() {
            Ok(settings) => *settings,
            Err(e) => {
                warn!("Failed to lock notification settings, using defaults: {}", e);
                NotificationSettings::default()
            }
        }
    }

    /// Current settings, or `None` when every channel is off
    fn active_settings(&self, event: &str) -> Option<NotificationSettings> {
        let settings = self.settings();
        if !settings.any_enabled() {
            debug!("All notification channels disabled, skipping {} notification", event);
            return None;
        }
        Some(settings)
    }
}

impl Notifier for SystemNotifier {
    fn notify_completion(&self) -> BoxFuture<'_, ()> {
        let Some(settings) = self.active_settings("completion") else {
            return future::ready(()).boxed();
        };
        Box::pin(async move {
            if settings.enable_visual_notification {
                info!("タイマーが終了しました。");
            }

            let audio = async {
                if settings.enable_audio {
                    if let Err(e) = play_timer_alert().await {
                        warn!("Timer alert playback failed: {}", e);
                    }
                }
            };
            let desktop = async {
                if settings.enable_desktop_notification {
                    if let Err(e) = show_notification(&DesktopNotification::timer_completed()).await {
                        warn!("Failed to show completion notification: {}", e);
                    }
                }
            };
            futures::join!(audio, desktop);
        })
    }

    fn notify_warning(&self, remaining_seconds: u32) -> BoxFuture<'_, ()> {
        let Some(settings) = self.active_settings("warning") else {
            return future::ready(()).boxed();
        };
        Box::pin(async move {
            if settings.enable_visual_notification {
                info!("残り{}秒です", remaining_seconds);
            }

            let audio = async {
                if settings.enable_audio {
                    if let Err(e) = play_warning_beep().await {
                        warn!("Warning beep playback failed: {}", e);
                    }
                }
            };
            let desktop = async {
                if settings.enable_desktop_notification && remaining_seconds == WARNING_THRESHOLD_SECONDS {
                    let notification = DesktopNotification::timer_warning(remaining_seconds);
                    if let Err(e) = show_notification(&notification).await {
                        warn!("Failed to show warning notification: {}", e);
                    }
                }
            };
            futures::join!(audio, desktop);
        })
    }
}

/// Probe which notification channels work on this machine
pub async fn initialize_notifications() -> NotificationSettings {
    let mut settings = NotificationSettings::new();

    if let Err(e) = check_notify_send_available().await {
        warn!("{}", e);
        settings.enable_desktop_notification = false;
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn silent() -> Arc<Mutex<NotificationSettings>> {
        Arc::new(Mutex::new(NotificationSettings {
            enable_audio: false,
            enable_desktop_notification: false,
            enable_visual_notification: true,
        }))
    }

    #[tokio::test]
    async fn disabled_channels_complete_immediately() {
        let notifier = SystemNotifier::new(silent());
        notifier.notify_completion().await;
        notifier.notify_warning(10).await;
    }

    #[test]
    fn all_channels_off_resolves_on_first_poll() {
        let notifier = SystemNotifier::new(Arc::new(Mutex::new(NotificationSettings {
            enable_audio: false,
            enable_desktop_notification: false,
            enable_visual_notification: false,
        })));
        assert!(notifier.active_settings("completion").is_none());
        assert!(notifier.notify_completion().now_or_never().is_some());
        assert!(notifier.notify_warning(10).now_or_never().is_some());
    }

    #[test]
    fn reads_latest_settings() {
        let shared = silent();
        let notifier = SystemNotifier::new(Arc::clone(&shared));
        shared.lock().unwrap().enable_audio = true;
        assert!(notifier.settings().enable_audio);
    }
}
