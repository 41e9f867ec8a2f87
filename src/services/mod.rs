//! Notification services module
//! 
//! This module contains the notifier capability used by the timer and the
//! system-level channels behind it: terminal bell and desktop notifications.

pub mod audio;
pub mod desktop;
pub mod notifier;
pub mod system_notifier;

// Re-export main types and functions
pub use notifier::{spawn_completion, spawn_warning, NoopNotifier, Notifier};
pub use system_notifier::{initialize_notifications, SystemNotifier};
