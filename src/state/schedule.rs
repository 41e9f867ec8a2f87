//! Timing anchors for the countdown task

use std::time::Duration;
use tokio::time::Instant;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Anchor bookkeeping for one countdown.
///
/// Tick `n` is due at `anchor + n seconds`. Pausing records when the pause
/// began; resuming shifts the anchor by the time spent paused, so progress
/// inside the current second survives a pause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulingContext {
    anchor: Option<Instant>,
    paused_at: Option<Instant>,
    ticks_delivered: u64,
}

impl SchedulingContext {
    /// Enter the running condition at `now`
    pub fn resume(&mut self, now: Instant) {
        match (self.anchor, self.paused_at.take()) {
            (None, _) => {
                self.anchor = Some(now);
                self.ticks_delivered = 0;
            }
            (Some(anchor), Some(paused_at)) => {
                self.anchor = Some(anchor + now.saturating_duration_since(paused_at));
            }
            (Some(_), None) => {}
        }
    }

    /// Leave the running condition at `now`
    pub fn pause(&mut self, now: Instant) {
        if self.anchor.is_some() && self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Forget all anchors
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn record_tick(&mut self) {
        self.ticks_delivered += 1;
    }

    /// When the next tick is due, if a countdown is anchored and not paused
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.paused_at.is_some() {
            return None;
        }
        let ticks = u32::try_from(self.ticks_delivered + 1).unwrap_or(u32::MAX);
        self.anchor.map(|anchor| anchor + TICK_PERIOD * ticks)
    }
}
