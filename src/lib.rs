//! Web Timer - A local countdown timer service
//! 
//! This library provides the countdown state machine with drift-corrected
//! ticking, validation of minute/second input, warning and completion
//! notifications, and an HTTP API for a browser display.

pub mod config;
pub mod input;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Timer, TimerState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
