//! Timer state structure and transition logic

use serde::{Deserialize, Serialize};

use crate::input::calculate_total_seconds;

/// Remaining seconds at which the warning window opens
pub const WARNING_THRESHOLD_SECONDS: u32 = 10;

/// Snapshot of the countdown, as owned by the timer and read by displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    /// Minutes component from the last `set_time`
    pub minutes: u32,
    /// Seconds component from the last `set_time`
    pub seconds: u32,
    pub is_running: bool,
    pub is_completed: bool,
    /// Duration fixed at the last `set_time`
    pub total_seconds: u32,
    /// Live countdown value
    pub remaining_seconds: u32,
}

/// Coarse classification of a state for display purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Every way the timer state can change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    SetTime { minutes: u32, seconds: u32 },
    Start,
    Pause,
    Reset,
    Tick,
    Complete,
}

impl TimerState {
    /// Create a stopped timer for the given duration
    pub fn new(minutes: u32, seconds: u32) -> Self {
        let total_seconds = calculate_total_seconds(minutes, seconds);
        Self {
            minutes,
            seconds,
            is_running: false,
            is_completed: false,
            total_seconds,
            remaining_seconds: total_seconds,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        if self.is_completed {
            TimerPhase::Completed
        } else if self.is_running {
            TimerPhase::Running
        } else if self.remaining_seconds < self.total_seconds {
            TimerPhase::Paused
        } else {
            TimerPhase::Idle
        }
    }

    /// Running with ten seconds or less to go
    pub fn is_warning(&self) -> bool {
        self.is_running
            && self.remaining_seconds > 0
            && self.remaining_seconds <= WARNING_THRESHOLD_SECONDS
    }

    /// Apply an action, returning the resulting state
    pub fn reduce(&self, action: TimerAction) -> TimerState {
        match action {
            TimerAction::SetTime { minutes, seconds } => {
                let total_seconds = calculate_total_seconds(minutes, seconds);
                TimerState {
                    minutes,
                    seconds,
                    total_seconds,
                    remaining_seconds: total_seconds,
                    is_completed: false,
                    // a zero duration has nothing left to count
                    is_running: self.is_running && total_seconds > 0,
                }
            }
            TimerAction::Start => {
                if self.total_seconds == 0 {
                    return *self;
                }
                let remaining_seconds = if self.remaining_seconds == 0 {
                    self.total_seconds
                } else {
                    self.remaining_seconds
                };
                TimerState {
                    is_running: true,
                    is_completed: false,
                    remaining_seconds,
                    ..*self
                }
            }
            TimerAction::Pause => TimerState {
                is_running: false,
                ..*self
            },
            TimerAction::Reset => TimerState {
                is_running: false,
                is_completed: false,
                remaining_seconds: self.total_seconds,
                ..*self
            },
            TimerAction::Tick => {
                if !self.is_running {
                    return *self;
                }
                let remaining_seconds = self.remaining_seconds.saturating_sub(1);
                TimerState {
                    remaining_seconds,
                    is_running: remaining_seconds > 0,
                    is_completed: remaining_seconds == 0 || self.is_completed,
                    ..*self
                }
            }
            TimerAction::Complete => TimerState {
                is_running: false,
                is_completed: true,
                remaining_seconds: 0,
                ..*self
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_zeroed() {
        let state = TimerState::default();
        assert_eq!(state, TimerState::new(0, 0));
        assert_eq!(state.phase(), TimerPhase::Idle);
    }

    #[test]
    fn initial_values() {
        let state = TimerState::new(5, 30);
        assert_eq!(state.total_seconds, 330);
        assert_eq!(state.remaining_seconds, 330);
        assert!(!state.is_running);
        assert!(!state.is_completed);
    }

    #[test]
    fn set_time_recomputes_and_clears_completion() {
        let completed = TimerState::new(0, 3).reduce(TimerAction::Complete);
        let state = completed.reduce(TimerAction::SetTime { minutes: 2, seconds: 45 });
        assert_eq!(state.minutes, 2);
        assert_eq!(state.seconds, 45);
        assert_eq!(state.total_seconds, 165);
        assert_eq!(state.remaining_seconds, 165);
        assert!(!state.is_completed);
    }

    #[test]
    fn set_time_while_running_overwrites_remaining() {
        let running = TimerState::new(1, 0)
            .reduce(TimerAction::Start)
            .reduce(TimerAction::Tick);
        let state = running.reduce(TimerAction::SetTime { minutes: 0, seconds: 20 });
        assert!(state.is_running);
        assert_eq!(state.remaining_seconds, 20);

        let zeroed = running.reduce(TimerAction::SetTime { minutes: 0, seconds: 0 });
        assert!(!zeroed.is_running);
    }

    #[test]
    fn start_requires_a_duration() {
        let state = TimerState::default().reduce(TimerAction::Start);
        assert!(!state.is_running);

        let state = TimerState::new(1, 0).reduce(TimerAction::Start);
        assert!(state.is_running);
        assert!(!state.is_completed);
        assert_eq!(state.phase(), TimerPhase::Running);
    }

    #[test]
    fn start_after_completion_rewinds() {
        let state = TimerState::new(0, 3)
            .reduce(TimerAction::Complete)
            .reduce(TimerAction::Start);
        assert!(state.is_running);
        assert!(!state.is_completed);
        assert_eq!(state.remaining_seconds, 3);
    }

    #[test]
    fn pause_keeps_remaining() {
        let state = TimerState::new(1, 0)
            .reduce(TimerAction::Start)
            .reduce(TimerAction::Tick)
            .reduce(TimerAction::Pause);
        assert!(!state.is_running);
        assert_eq!(state.remaining_seconds, 59);
        assert_eq!(state.phase(), TimerPhase::Paused);
    }

    #[test]
    fn reset_restores_total() {
        let state = TimerState::new(2, 30)
            .reduce(TimerAction::Start)
            .reduce(TimerAction::Tick)
            .reduce(TimerAction::Reset);
        assert_eq!(state.remaining_seconds, 150);
        assert!(!state.is_running);
        assert!(!state.is_completed);

        let state = TimerState::new(0, 1)
            .reduce(TimerAction::Start)
            .reduce(TimerAction::Tick)
            .reduce(TimerAction::Reset);
        assert!(!state.is_completed);
        assert_eq!(state.remaining_seconds, 1);
    }

    #[test]
    fn tick_to_zero_completes() {
        let state = TimerState::new(0, 1)
            .reduce(TimerAction::Start)
            .reduce(TimerAction::Tick);
        assert_eq!(state.remaining_seconds, 0);
        assert!(!state.is_running);
        assert!(state.is_completed);
        assert_eq!(state.phase(), TimerPhase::Completed);
    }

    #[test]
    fn tick_never_goes_below_zero() {
        let running_at_zero = TimerState {
            is_running: true,
            ..TimerState::new(0, 0)
        };
        let state = running_at_zero.reduce(TimerAction::Tick);
        assert_eq!(state.remaining_seconds, 0);
        assert!(state.is_completed);
        assert!(!state.is_running);

        let again = state.reduce(TimerAction::Tick);
        assert_eq!(again.remaining_seconds, 0);
    }

    #[test]
    fn tick_is_ignored_when_stopped() {
        let state = TimerState::new(0, 5);
        assert_eq!(state.reduce(TimerAction::Tick), state);
    }

    #[test]
    fn complete_forces_zero() {
        let state = TimerState::new(3, 0)
            .reduce(TimerAction::Start)
            .reduce(TimerAction::Complete);
        assert_eq!(state.remaining_seconds, 0);
        assert!(state.is_completed);
        assert!(!state.is_running);
    }

    #[test]
    fn warning_window() {
        let mut state = TimerState::new(0, 11).reduce(TimerAction::Start);
        assert!(!state.is_warning());
        state = state.reduce(TimerAction::Tick);
        assert!(state.is_warning());
        assert!(!state.reduce(TimerAction::Pause).is_warning());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(TimerState::new(1, 5)).unwrap();
        assert_eq!(json["totalSeconds"], 65);
        assert_eq!(json["remainingSeconds"], 65);
        assert_eq!(json["isRunning"], false);
    }
}
