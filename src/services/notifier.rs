//! Notification capability consumed by the timer

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::debug;

/// Delivers warning and completion notifications.
///
/// Implementations must absorb their own failures (missing audio device,
/// denied notification permission, ...); the timer never sees them.
pub trait Notifier: Send + Sync + 'static {
    /// The countdown reached zero
    fn notify_completion(&self) -> BoxFuture<'_, ()>;

    /// The countdown entered the warning window
    fn notify_warning(&self, remaining_seconds: u32) -> BoxFuture<'_, ()>;
}

/// Notifier that does nothing, for headless use
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify_completion(&self) -> BoxFuture<'_, ()> {
        Box::pin(async {})
    }

    fn notify_warning(&self, _remaining_seconds: u32) -> BoxFuture<'_, ()> {
        Box::pin(async {})
    }
}

/// Fire-and-forget completion notification
pub fn spawn_completion(notifier: &Arc<dyn Notifier>) {
    let notifier = Arc::clone(notifier);
    tokio::spawn(async move {
        notifier.notify_completion().await;
        debug!("Completion notification dispatched");
    });
}

/// Fire-and-forget warning notification
pub fn spawn_warning(notifier: &Arc<dyn Notifier>, remaining_seconds: u32) {
    let notifier = Arc::clone(notifier);
    tokio::spawn(async move {
        notifier.notify_warning(remaining_seconds).await;
        debug!("Warning notification dispatched ({}s remaining)", remaining_seconds);
    });
}
