//! State management module
//! 
//! This module contains the timer state, its transitions, and the shared
//! application state.

pub mod app_state;
pub mod notification_settings;
pub mod schedule;
pub mod timer;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use notification_settings::NotificationSettings;
pub use schedule::SchedulingContext;
pub use timer::{CompletionCallback, Timer};
pub use timer_state::{TimerAction, TimerPhase, TimerState, WARNING_THRESHOLD_SECONDS};
