//! Web Timer - A local countdown timer service
//!
//! This is the main entry point for the web-timer application.

use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tracing::info;

use web_timer::{
    api::create_router,
    config::Config,
    input::{calculate_total_seconds, format_time},
    services::{initialize_notifications, SystemNotifier},
    state::{AppState, Timer},
    tasks::phase_log_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("web_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting web-timer server v{}", env!("CARGO_PKG_VERSION"));

    let (minutes, seconds) = config.initial_time();
    info!("Configuration: host={}, port={}, initial={}",
          config.host, config.port, format_time(calculate_total_seconds(minutes, seconds)));

    // Detect which notification channels work here, then apply the CLI switches
    let settings = config.notification_settings(initialize_notifications().await);
    info!("Notifications: audio={}, desktop={}, visual={}",
          settings.enable_audio, settings.enable_desktop_notification, settings.enable_visual_notification);
    let settings = Arc::new(Mutex::new(settings));

    // Create the timer and application state
    let notifier = Arc::new(SystemNotifier::new(Arc::clone(&settings)));
    let timer = Timer::new(minutes, seconds, notifier);
    let state = Arc::new(AppState::new(timer.clone(), settings, config.port, config.host.clone()));

    // Log phase transitions in the background
    tokio::spawn(phase_log_task(timer.subscribe()));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /state    - Current timer snapshot");
    info!("  GET  /events   - Server-sent snapshot stream");
    info!("  POST /time     - Set minutes/seconds");
    info!("  POST /start    - Start or resume");
    info!("  POST /pause    - Pause");
    info!("  POST /reset    - Reset to the full duration");
    info!("  POST /toggle   - Start/pause button");
    info!("  GET  /settings - Notification settings (PUT to change)");
    info!("  GET  /status   - Server status");
    info!("  GET  /health   - Health check");

    // Event streams never end; drop the server on a shutdown signal
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
