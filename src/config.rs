//! Configuration and CLI argument handling

use clap::Parser;
use tracing::warn;

use crate::{
    input::{parse_time_value, validate_minutes, validate_seconds},
    state::NotificationSettings,
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "web-timer")]
#[command(about = "A local countdown timer service with warning and completion notifications")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Initial minutes (0-59)
    #[arg(short, long, default_value = "0")]
    pub minutes: String,

    /// Initial seconds (0-59)
    #[arg(short, long, default_value = "0")]
    pub seconds: String,

    /// Disable the terminal bell
    #[arg(long)]
    pub no_audio: bool,

    /// Disable desktop notifications
    #[arg(long)]
    pub no_desktop_notification: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Initial duration, clamped into range. Invalid input is logged and
    /// replaced by its safe value rather than rejected.
    pub fn initial_time(&self) -> (u32, u32) {
        for validation in [validate_minutes(&self.minutes), validate_seconds(&self.seconds)] {
            if let Some(message) = validation.error_message {
                warn!("{}", message);
            }
        }
        (parse_time_value(&self.minutes), parse_time_value(&self.seconds))
    }

    /// Apply the command line switches on top of the detected settings
    pub fn notification_settings(&self, available: NotificationSettings) -> NotificationSettings {
        NotificationSettings {
            enable_audio: available.enable_audio && !self.no_audio,
            enable_desktop_notification: available.enable_desktop_notification
                && !self.no_desktop_notification,
            ..available
        }
    }
}
