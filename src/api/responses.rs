//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    input::{format_time, RawValue},
    state::{NotificationSettings, TimerPhase, TimerState},
};

/// Snapshot of the timer as rendered by a display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    #[serde(flatten)]
    pub state: TimerState,
    /// Remaining time as `MM:SS`
    pub display: String,
    pub phase: TimerPhase,
    pub is_warning: bool,
    pub timestamp: DateTime<Utc>,
}

impl StateResponse {
    /// Build the display payload for a committed state
    pub fn new(state: TimerState) -> Self {
        Self {
            state,
            display: format_time(state.remaining_seconds),
            phase: state.phase(),
            is_warning: state.is_warning(),
            timestamp: Utc::now(),
        }
    }
}

/// A raw field value: browsers send either numbers or the text as typed.
/// An explicit `null` is an empty field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
    Null,
}

impl<'a> From<&'a FieldValue> for RawValue<'a> {
    fn from(value: &'a FieldValue) -> Self {
        match value {
            FieldValue::Integer(n) => RawValue::Number(*n),
            FieldValue::Decimal(n) => RawValue::Decimal(*n),
            FieldValue::Text(text) => RawValue::Text(text.as_str()),
            FieldValue::Null => RawValue::Missing,
        }
    }
}

/// Body of `POST /time`; absent fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetTimeRequest {
    #[serde(default, deserialize_with = "present_field")]
    pub minutes: Option<FieldValue>,
    #[serde(default, deserialize_with = "present_field")]
    pub seconds: Option<FieldValue>,
}

/// A key that is present is `Some`, even when its value is `null`
fn present_field<'de, D>(deserializer: D) -> Result<Option<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    FieldValue::deserialize(deserializer).map(Some)
}

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.minutes.is_none() && self.seconds.is_none()
    }
}

/// Response to `POST /time`: the applied state plus any advisory messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetTimeResponse {
    #[serde(flatten)]
    pub state: StateResponse,
    pub errors: FieldErrors,
}

/// Response body for rejected requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

/// Notification settings response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub settings: NotificationSettings,
    pub timestamp: DateTime<Utc>,
}

impl SettingsResponse {
    pub fn new(settings: NotificationSettings) -> Self {
        Self {
            settings,
            timestamp: Utc::now(),
        }
    }
}

/// Server status with timer information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: StateResponse,
    pub notifications: NotificationSettings,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
