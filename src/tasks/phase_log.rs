//! Phase change logging task

use tokio::sync::watch;
use tracing::{debug, info};

use crate::{
    input::format_time,
    state::{TimerPhase, TimerState},
};

/// Log every phase change seen on the timer's update channel.
///
/// Returns once the timer is dropped and the channel closes.
pub async fn phase_log_task(mut updates: watch::Receiver<TimerState>) -> usize {
    info!("Starting phase log task");

    let mut last_phase = updates.borrow_and_update().phase();
    let mut transitions = 0;

    while updates.changed().await.is_ok() {
        let state = *updates.borrow_and_update();
        let phase = state.phase();
        if phase == last_phase {
            continue;
        }

        transitions += 1;
        match phase {
            TimerPhase::Running => info!("Running: {} remaining", format_time(state.remaining_seconds)),
            TimerPhase::Paused => info!("Paused: {} remaining", format_time(state.remaining_seconds)),
            TimerPhase::Completed => info!("Completed after {}", format_time(state.total_seconds)),
            TimerPhase::Idle => info!("Idle at {}", format_time(state.remaining_seconds)),
        }
        last_phase = phase;
    }

    debug!("Timer update channel closed, phase log task exiting");
    transitions
}
