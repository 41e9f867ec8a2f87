//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{debug, error, info, warn};

use crate::{
    input::{parse_time_value, validate_minutes, validate_seconds},
    state::{AppState, NotificationSettings, Timer},
};
use super::responses::{
    ErrorResponse, FieldErrors, HealthResponse, SetTimeRequest, SetTimeResponse,
    SettingsResponse, StateResponse, StatusResponse,
};

/// Rejection with a JSON body
pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(ErrorResponse::new(message.to_string())))
}

/// Handle GET /state - Return the current timer snapshot
pub async fn state_handler(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    Json(StateResponse::new(state.timer.snapshot()))
}

/// Handle GET /events - Stream a snapshot on every state change
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("Event stream subscriber connected");
    let updates = state.timer.subscribe();

    let events = stream::unfold((updates, true), |(mut updates, first)| async move {
        if !first && updates.changed().await.is_err() {
            return None;
        }
        let snapshot = *updates.borrow_and_update();
        let event = Event::default()
            .event("state")
            .json_data(StateResponse::new(snapshot))
            .unwrap_or_else(|e| {
                warn!("Failed to encode state event: {}", e);
                Event::default().comment("encoding failed")
            });
        Some((Ok::<_, Infallible>(event), (updates, false)))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle POST /time - Validate, clamp, and apply a new duration
pub async fn set_time_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetTimeRequest>,
) -> Result<Json<SetTimeResponse>, ApiError> {
    let mut errors = FieldErrors::default();

    let applied = state.timer.set_time_if_stopped(|current| {
        let minutes = match &request.minutes {
            Some(value) => {
                errors.minutes = validate_minutes(value).error_message;
                parse_time_value(value)
            }
            None => current.minutes,
        };
        let seconds = match &request.seconds {
            Some(value) => {
                errors.seconds = validate_seconds(value).error_message;
                parse_time_value(value)
            }
            None => current.seconds,
        };
        (minutes, seconds)
    });

    let Some(timer_state) = applied else {
        warn!("Rejected time change while the timer is running");
        return Err(api_error(
            StatusCode::CONFLICT,
            "Time cannot be changed while the timer is running",
        ));
    };
    state.record_action("time");

    if !errors.is_empty() {
        debug!("Time input errors: {:?}", errors);
    }

    Ok(Json(SetTimeResponse {
        state: StateResponse::new(timer_state),
        errors,
    }))
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let timer_state = state.apply("start", Timer::start);
    info!("Start endpoint called - running={}", timer_state.is_running);
    Json(StateResponse::new(timer_state))
}

/// Handle POST /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let timer_state = state.apply("pause", Timer::pause);
    info!("Pause endpoint called");
    Json(StateResponse::new(timer_state))
}

/// Handle POST /reset - Rewind to the full duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let timer_state = state.apply("reset", Timer::reset);
    info!("Reset endpoint called");
    Json(StateResponse::new(timer_state))
}

/// Handle POST /toggle - Start when stopped, pause when running
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let timer_state = if state.timer.snapshot().is_running {
        state.apply("pause", Timer::pause)
    } else {
        state.apply("start", Timer::start)
    };
    Json(StateResponse::new(timer_state))
}

/// Handle GET /settings - Return notification settings
pub async fn get_settings_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SettingsResponse>, ApiError> {
    match state.get_notification_settings() {
        Ok(settings) => Ok(Json(SettingsResponse::new(settings))),
        Err(e) => {
            error!("Failed to get notification settings: {}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, &e))
        }
    }
}

/// Handle PUT /settings - Replace notification settings
pub async fn put_settings_handler(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<NotificationSettings>,
) -> Result<Json<SettingsResponse>, ApiError> {
    match state.set_notification_settings(settings) {
        Ok(settings) => Ok(Json(SettingsResponse::new(settings))),
        Err(e) => {
            error!("Failed to update notification settings: {}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, &e))
        }
    }
}

/// Handle GET /status - Return server status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let notifications = match state.get_notification_settings() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to get notification settings: {}", e);
            return Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, &e));
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer: StateResponse::new(state.timer.snapshot()),
        notifications,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
