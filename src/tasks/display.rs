//! Display refresh background task

use std::sync::Arc;
use tracing::{debug, info};

use crate::{state::AppState, utils::display_line};

/// Background task that renders the start page whenever the session changes
pub async fn display_task(state: Arc<AppState>) {
    info!("Starting display task");

    let mut snapshot_rx = state.subscribe_snapshots();
    let mut last_running = snapshot_rx.borrow_and_update().running_phase();
    debug!("{}", display_line(&snapshot_rx.borrow()));

    while snapshot_rx.changed().await.is_ok() {
        let snapshot = snapshot_rx.borrow_and_update().clone();

        let running = snapshot.running_phase();
        if running != last_running {
            match running {
                Some(phase) => info!("Now running: {}", phase.as_str()),
                None => info!("Timer idle, next phase: {}", snapshot.active_phase.as_str()),
            }
            last_running = running;
        }

        debug!("{}", display_line(&snapshot));
    }

    info!("Snapshot channel closed, stopping display task");
}
