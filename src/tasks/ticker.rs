//! Interval ticker background task

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::broadcast::error::RecvError,
    time::{interval_at, sleep, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use crate::state::AppState;

/// Background task that ticks the session once per interval while a phase runs.
///
/// This is the only tick loop in the process. Any user command restarts the
/// interval, so the first decrement after a start always comes one full
/// interval later, and a pause takes effect before the next decrement.
pub async fn interval_ticker_task(state: Arc<AppState>) {
    info!("Starting interval ticker task");

    let mut command_rx = state.subscribe_commands();

    loop {
        let running_phase = match state.get_snapshot() {
            Ok(snapshot) => snapshot.running_phase(),
            Err(e) => {
                error!("Failed to read session: {}", e);
                sleep(Duration::from_secs(1)).await;
                continue;
            }
        };

        if running_phase.is_none() {
            // Idle, wait for a command
            match command_rx.recv().await {
                Ok(command) => {
                    debug!("Ticker received command while idle: {:?}", command);
                    continue;
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Ticker missed {} commands", skipped);
                    continue;
                }
                Err(RecvError::Closed) => {
                    info!("Command channel closed, stopping ticker");
                    return;
                }
            }
        }

        let period = match state.tick_interval() {
            Ok(period) => period,
            Err(e) => {
                error!("Failed to read tick interval: {}", e);
                sleep(Duration::from_secs(1)).await;
                continue;
            }
        };

        debug!("Ticking {:?} every {:?}", running_phase, period);
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match state.tick() {
                        Ok(outcome) if outcome.keeps_running() => {}
                        Ok(outcome) => {
                            debug!("Session idle after {:?}, stopping tick loop", outcome);
                            break;
                        }
                        Err(e) => {
                            error!("Failed to tick session: {}", e);
                            break;
                        }
                    }
                }

                // Any command invalidates the current interval
                result = command_rx.recv() => {
                    match result {
                        Ok(command) => {
                            debug!("Ticker restarting after command: {:?}", command);
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("Ticker missed {} commands", skipped);
                        }
                        Err(RecvError::Closed) => {
                            info!("Command channel closed, stopping ticker");
                            return;
                        }
                    }
                    break;
                }
            }
        }
    }
}
