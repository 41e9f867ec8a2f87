//! Countdown timer handle
//!
//! `Timer` owns the authoritative `TimerState` and the countdown task that
//! advances it. All transitions go through `TimerState::reduce` under one
//! lock; ending a running session aborts its task under that same lock, and a
//! tick is only applied while its session is still the current one.

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tokio::{sync::watch, task::JoinHandle, time::Instant};
use tracing::{debug, info};

use super::{SchedulingContext, TimerAction, TimerState, WARNING_THRESHOLD_SECONDS};
use crate::{
    input::format_time,
    services::{spawn_completion, spawn_warning, Notifier},
    tasks::countdown_task,
};

/// Invoked once each time the countdown reaches zero
pub type CompletionCallback = Arc<dyn Fn() + Send + Sync>;

/// Shared handle to the countdown timer
#[derive(Clone)]
pub struct Timer {
    shared: Arc<Shared>,
}

struct Shared {
    inner: Mutex<Inner>,
    updates: watch::Sender<TimerState>,
    notifier: Arc<dyn Notifier>,
    on_complete: Option<CompletionCallback>,
}

struct Inner {
    state: TimerState,
    schedule: SchedulingContext,
    session: Option<CountdownSession>,
    next_session_id: u64,
}

impl Inner {
    fn owns(&self, session_id: u64) -> bool {
        self.session.as_ref().is_some_and(|s| s.id == session_id)
    }
}

struct CountdownSession {
    id: u64,
    task: JoinHandle<()>,
}

/// Notifications to dispatch once the lock is released
#[derive(Debug, Default)]
struct Effects {
    warning: Option<u32>,
    completed: bool,
}

/// Whether the countdown task should keep going after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickOutcome {
    Continue,
    Stop,
}

impl Timer {
    /// Create a stopped timer for the given duration
    pub fn new(minutes: u32, seconds: u32, notifier: Arc<dyn Notifier>) -> Self {
        Self::build(minutes, seconds, notifier, None)
    }

    /// Create a stopped timer that also calls `on_complete` at every completion
    pub fn with_completion_callback(
        minutes: u32,
        seconds: u32,
        notifier: Arc<dyn Notifier>,
        on_complete: CompletionCallback,
    ) -> Self {
        Self::build(minutes, seconds, notifier, Some(on_complete))
    }

    fn build(
        minutes: u32,
        seconds: u32,
        notifier: Arc<dyn Notifier>,
        on_complete: Option<CompletionCallback>,
    ) -> Self {
        let state = TimerState::new(minutes, seconds);
        let (updates, _) = watch::channel(state);

        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    state,
                    schedule: SchedulingContext::default(),
                    session: None,
                    next_session_id: 0,
                }),
                updates,
                notifier,
                on_complete,
            }),
        }
    }

    /// Current committed state
    pub fn snapshot(&self) -> TimerState {
        self.lock().state
    }

    /// Receive every committed state from now on
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.shared.updates.subscribe()
    }

    /// Set a new duration, cancelling any countdown in progress.
    ///
    /// A running timer keeps running from the new duration.
    pub fn set_time(&self, minutes: u32, seconds: u32) -> TimerState {
        let mut inner = self.lock();
        self.set_time_locked(&mut inner, minutes, seconds)
    }

    /// Set a new duration only if the timer is not running.
    ///
    /// `resolve` sees the current state and returns the new minutes and
    /// seconds; the check and the change happen under one lock. Returns
    /// `None` when the timer is running.
    pub fn set_time_if_stopped<F>(&self, resolve: F) -> Option<TimerState>
    where
        F: FnOnce(&TimerState) -> (u32, u32),
    {
        let mut inner = self.lock();
        if inner.state.is_running {
            return None;
        }
        let (minutes, seconds) = resolve(&inner.state);
        Some(self.set_time_locked(&mut inner, minutes, seconds))
    }

    fn set_time_locked(&self, inner: &mut Inner, minutes: u32, seconds: u32) -> TimerState {
        self.cancel_session(inner);
        inner.schedule.clear();

        let state = self.commit(inner, TimerAction::SetTime { minutes, seconds });
        if state.is_running {
            self.arm(inner);
        }

        info!("Timer set to {}", format_time(state.total_seconds));
        state
    }

    /// Start or resume counting; ignored when no duration is set
    pub fn start(&self) -> TimerState {
        let mut inner = self.lock();
        let before = inner.state;
        let state = self.commit(&mut inner, TimerAction::Start);

        if !state.is_running {
            debug!("Start ignored, no duration set");
            return state;
        }
        if inner.session.is_none() {
            self.arm(&mut inner);
        }
        drop(inner);

        if !before.is_running {
            info!("Timer started with {} remaining", format_time(state.remaining_seconds));
            if state.remaining_seconds == WARNING_THRESHOLD_SECONDS {
                self.run_effects(Effects {
                    warning: Some(state.remaining_seconds),
                    completed: false,
                });
            }
        }
        state
    }

    /// Stop counting, keeping the remaining time
    pub fn pause(&self) -> TimerState {
        let mut inner = self.lock();
        let was_running = inner.state.is_running;
        self.cancel_session(&mut inner);

        let state = self.commit(&mut inner, TimerAction::Pause);
        if was_running {
            inner.schedule.pause(Instant::now());
            info!("Timer paused at {}", format_time(state.remaining_seconds));
        }
        state
    }

    /// Stop counting and rewind to the full duration
    pub fn reset(&self) -> TimerState {
        let mut inner = self.lock();
        self.cancel_session(&mut inner);
        inner.schedule.clear();

        let state = self.commit(&mut inner, TimerAction::Reset);
        info!("Timer reset to {}", format_time(state.remaining_seconds));
        state
    }

    /// Apply one tick outside of any countdown session
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn tick(&self) -> TimerState {
        let mut inner = self.lock();
        let (state, effects) = self.apply_tick(&mut inner);
        drop(inner);

        self.run_effects(effects);
        state
    }

    /// Force the timer into the completed state
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn complete(&self) -> TimerState {
        let mut inner = self.lock();
        let was_completed = inner.state.is_completed;
        self.cancel_session(&mut inner);
        inner.schedule.clear();

        let state = self.commit(&mut inner, TimerAction::Complete);
        drop(inner);

        if !was_completed {
            self.run_effects(Effects {
                warning: None,
                completed: true,
            });
        }
        state
    }

    /// Deadline of the next tick for `session_id`, or `None` once that
    /// session has ended
    pub(crate) fn next_deadline(&self, session_id: u64) -> Option<Instant> {
        let inner = self.lock();
        if !inner.owns(session_id) {
            return None;
        }
        inner.schedule.next_deadline()
    }

    /// Apply a tick on behalf of the countdown task owning `session_id`
    pub(crate) fn tick_session(&self, session_id: u64) -> TickOutcome {
        let mut inner = self.lock();
        if !inner.owns(session_id) {
            debug!("Dropping tick from stale session {}", session_id);
            return TickOutcome::Stop;
        }
        let (state, effects) = self.apply_tick(&mut inner);
        drop(inner);

        self.run_effects(effects);
        if state.is_running {
            TickOutcome::Continue
        } else {
            TickOutcome::Stop
        }
    }

    fn apply_tick(&self, inner: &mut Inner) -> (TimerState, Effects) {
        let before = inner.state;
        if !before.is_running {
            return (before, Effects::default());
        }

        let state = self.commit(inner, TimerAction::Tick);
        inner.schedule.record_tick();
        debug!("Tick: {} remaining", format_time(state.remaining_seconds));

        let mut effects = Effects::default();
        if state.is_completed {
            self.cancel_session(inner);
            inner.schedule.clear();
            effects.completed = true;
        } else if state.remaining_seconds == WARNING_THRESHOLD_SECONDS {
            effects.warning = Some(state.remaining_seconds);
        }
        (state, effects)
    }

    fn commit(&self, inner: &mut Inner, action: TimerAction) -> TimerState {
        inner.state = inner.state.reduce(action);
        self.shared.updates.send_replace(inner.state);
        inner.state
    }

    /// Anchor the schedule and spawn a countdown task for a new session
    fn arm(&self, inner: &mut Inner) {
        inner.schedule.resume(Instant::now());

        let id = inner.next_session_id;
        inner.next_session_id += 1;
        let task = tokio::spawn(countdown_task(self.clone(), id));
        inner.session = Some(CountdownSession { id, task });
        debug!("Countdown session {} armed", id);
    }

    fn cancel_session(&self, inner: &mut Inner) {
        if let Some(session) = inner.session.take() {
            session.task.abort();
            debug!("Countdown session {} cancelled", session.id);
        }
    }

    fn run_effects(&self, effects: Effects) {
        if let Some(remaining) = effects.warning {
            info!("{}s remaining", remaining);
            spawn_warning(&self.shared.notifier, remaining);
        }
        if effects.completed {
            info!("Timer completed");
            if let Some(on_complete) = &self.shared.on_complete {
                on_complete();
            }
            spawn_completion(&self.shared.notifier);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.shared
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("state", &self.snapshot())
            .finish()
    }
}
