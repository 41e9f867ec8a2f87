//! Time value input handling
//!
//! This module turns raw user input into validation feedback and safe,
//! bounded values for the timer state machine.

pub mod format;
pub mod validation;

// Re-export main functions
pub use format::{calculate_total_seconds, format_time};
pub use validation::{
    parse_time_value, validate_component, validate_minutes, validate_seconds, RawValue,
    TimeField, ValidationResult, MAX_COMPONENT_VALUE,
};
