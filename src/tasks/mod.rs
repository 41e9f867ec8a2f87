//! Background tasks module
//! 
//! This module contains the tasks that run alongside the timer and the HTTP server.

pub mod countdown;
pub mod phase_log;

// Re-export main functions
pub(crate) use countdown::countdown_task;
pub use phase_log::phase_log_task;
