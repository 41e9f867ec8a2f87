//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::info;

use super::{NotificationSettings, Timer, TimerState};

/// Application state shared by all HTTP handlers
#[derive(Debug)]
pub struct AppState {
    /// The countdown timer
    pub timer: Timer,
    /// Notification preferences, shared with the system notifier
    pub notification_settings: Arc<Mutex<NotificationSettings>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState around an existing timer and settings handle
    pub fn new(
        timer: Timer,
        notification_settings: Arc<Mutex<NotificationSettings>>,
        port: u16,
        host: String,
    ) -> Self {
        Self {
            timer,
            notification_settings,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Run a timer action and record it as the last action
    pub fn apply<F>(&self, action: &str, operation: F) -> TimerState
    where
        F: FnOnce(&Timer) -> TimerState,
    {
        let state = operation(&self.timer);
        self.record_action(action);
        state
    }

    /// Record `action` as the last action taken
    pub fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get current notification settings
    pub fn get_notification_settings(&self) -> Result<NotificationSettings, String> {
        self.notification_settings.lock()
            .map(|settings| *settings)
            .map_err(|e| format!("Failed to lock notification settings: {}", e))
    }

    /// Replace the notification settings
    pub fn set_notification_settings(&self, settings: NotificationSettings) -> Result<NotificationSettings, String> {
        let mut current = self.notification_settings.lock()
            .map_err(|e| format!("Failed to lock notification settings: {}", e))?;

        *current = settings;
        info!("Notification settings updated: audio={}, desktop={}, visual={}",
              settings.enable_audio, settings.enable_desktop_notification, settings.enable_visual_notification);
        Ok(settings)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::NoopNotifier;

    fn app_state() -> AppState {
        AppState::new(
            Timer::new(1, 0, Arc::new(NoopNotifier)),
            Arc::new(Mutex::new(NotificationSettings::default())),
            20554,
            "127.0.0.1".to_string(),
        )
    }

    #[test]
    fn records_last_action() {
        let state = app_state();
        assert_eq!(state.get_last_action(), (None, None));

        let timer_state = state.apply("reset", Timer::reset);
        assert_eq!(timer_state.remaining_seconds, 60);

        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("reset"));
        assert!(time.is_some());
    }

    #[test]
    fn settings_round_trip_through_shared_handle() {
        let state = app_state();
        let updated = NotificationSettings {
            enable_audio: false,
            ..NotificationSettings::default()
        };
        state.set_notification_settings(updated).unwrap();

        assert_eq!(state.get_notification_settings().unwrap(), updated);
        assert!(!state.notification_settings.lock().unwrap().enable_audio);
    }

    #[test]
    fn uptime_starts_in_seconds() {
        assert!(app_state().get_uptime().ends_with('s'));
    }
}
