//! Countdown background task

use tokio::time::sleep_until;
use tracing::debug;

use crate::state::{timer::TickOutcome, Timer};

/// Drive one countdown session until it ends.
///
/// Each tick is scheduled against the session's anchor rather than the
/// previous wake-up, so scheduler latency never accumulates. A wake-up that
/// arrives late delivers the missed ticks back to back.
pub(crate) async fn countdown_task(timer: Timer, session_id: u64) {
    debug!("Countdown session {} running", session_id);

    while let Some(deadline) = timer.next_deadline(session_id) {
        sleep_until(deadline).await;

        if timer.tick_session(session_id) == TickOutcome::Stop {
            break;
        }
    }

    debug!("Countdown session {} finished", session_id);
}
