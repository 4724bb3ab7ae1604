//! Interval Timer - An exercise/rest interval timer with haptic phase alerts
//!
//! This is the main entry point for the interval-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use interval_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    services::{CommandHaptic, Haptic, LogHaptic},
    tasks::{display_task, interval_ticker_task},
    utils::{format_duration, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("interval_timer={},tower_http=info", config.log_level()))
        .init();

    let session_config = config.session_config()?;

    info!("Starting interval-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, exercise={}, rest={}, repetitions={}, rest_reset={:?}",
          config.host, config.port,
          format_duration(session_config.exercise_duration_ms()),
          format_duration(session_config.rest_duration_ms()),
          session_config.total_repetitions(),
          session_config.rest_reset());

    let haptic: Arc<dyn Haptic> = match &config.haptic_command {
        Some(program) => {
            info!("Using haptic command: {}", program);
            Arc::new(CommandHaptic::new(program.clone()))
        }
        None => {
            info!("No haptic command configured, logging vibrations only");
            Arc::new(LogHaptic)
        }
    };

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), session_config, haptic));

    // Start the ticker and display background tasks
    let ticker_state = Arc::clone(&state);
    tokio::spawn(async move {
        interval_ticker_task(ticker_state).await;
    });

    let display_state = Arc::clone(&state);
    tokio::spawn(async move {
        display_task(display_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start-pause            - Start or pause the active phase");
    info!("  POST /reset                  - Stop and restore the session");
    info!("  POST /navigate/exercise-time - Open the exercise time picker");
    info!("  POST /navigate/rest-time     - Open the rest time picker");
    info!("  POST /navigate/start         - Return to the start page");
    info!("  GET  /status                 - Current countdowns and repetitions");
    info!("  GET  /health                 - Health check");

    // Setup graceful shutdown
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
