//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use crate::services::Haptic;
use super::{Screen, SessionCommand, SessionConfig, SessionSnapshot, TickOutcome, TimerSession};

/// Main application state that owns the timer session and its observers
pub struct AppState {
    /// The interval timer session; every read and write goes through this lock
    session: Mutex<TimerSession>,
    /// Haptic backend pulsed on phase completion
    haptic: Arc<dyn Haptic>,
    /// Current navigation target
    screen: Mutex<Screen>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for user command notifications
    pub command_tx: broadcast::Sender<SessionCommand>,
    /// Channel for session snapshot updates
    pub snapshot_tx: watch::Sender<SessionSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<SessionSnapshot>,
}

impl AppState {
    /// Create a new AppState with an idle session
    pub fn new(port: u16, host: String, config: SessionConfig, haptic: Arc<dyn Haptic>) -> Self {
        let session = TimerSession::new(config);
        let (command_tx, _) = broadcast::channel(100);
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());

        Self {
            session: Mutex::new(session),
            haptic,
            screen: Mutex::new(Screen::default()),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            command_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Apply an update to the session and publish the resulting snapshot
    fn update_session<T, F>(&self, updater: F) -> Result<(T, SessionSnapshot), String>
    where
        F: FnOnce(&mut TimerSession) -> T,
    {
        let mut session = self.session.lock()
            .map_err(|e| format!("Failed to lock timer session: {}", e))?;

        let result = updater(&mut *session);
        let snapshot = session.snapshot();
        drop(session); // Release the lock early

        // send_replace never fails, even without subscribers
        self.snapshot_tx.send_replace(snapshot.clone());

        Ok((result, snapshot))
    }

    /// Record a user command and notify the ticker
    fn record_command(&self, command: SessionCommand) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(command.action_name().to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        // No receivers simply means the ticker is not running yet
        if let Err(e) = self.command_tx.send(command) {
            debug!("No listeners for session command: {}", e);
        }
    }

    /// Toggle the running flag of the active phase
    pub fn start_pause(&self) -> Result<SessionSnapshot, String> {
        let ((phase, running), snapshot) = self.update_session(|session| {
            let running = session.start_pause();
            (session.active_phase(), running)
        })?;

        info!("{} phase {}", phase.as_str(), if running { "started" } else { "paused" });
        self.record_command(SessionCommand::StartPause { phase, running });
        Ok(snapshot)
    }

    /// Stop both phases and restore countdowns and repetitions
    pub fn reset(&self) -> Result<SessionSnapshot, String> {
        let ((), snapshot) = self.update_session(|session| session.reset())?;

        info!("Session reset");
        self.record_command(SessionCommand::Reset);
        Ok(snapshot)
    }

    /// Advance the session by one tick
    pub fn tick(&self) -> Result<TickOutcome, String> {
        let (outcome, _) = self.update_session(|session| session.tick(self.haptic.as_ref()))?;

        match outcome {
            TickOutcome::Idle => debug!("Tick while idle"),
            TickOutcome::Decremented { phase, remaining_ms } => {
                debug!("{} phase: {}ms remaining", phase.as_str(), remaining_ms)
            }
            TickOutcome::PhaseCompleted { phase } => {
                info!("{} phase complete, rest started", phase.as_str())
            }
            TickOutcome::RepetitionCompleted { repetitions_remaining } => {
                info!("Repetition complete, {} remaining", repetitions_remaining)
            }
            TickOutcome::CycleCompleted => info!("All repetitions complete, timer idle"),
        }

        Ok(outcome)
    }

    /// Get current session snapshot
    pub fn get_snapshot(&self) -> Result<SessionSnapshot, String> {
        self.session.lock()
            .map(|session| session.snapshot())
            .map_err(|e| format!("Failed to lock timer session: {}", e))
    }

    /// Interval at which the session expects to be ticked
    pub fn tick_interval(&self) -> Result<Duration, String> {
        self.session.lock()
            .map(|session| Duration::from_millis(session.config().tick_ms()))
            .map_err(|e| format!("Failed to lock timer session: {}", e))
    }

    /// Subscribe to user command notifications
    pub fn subscribe_commands(&self) -> broadcast::Receiver<SessionCommand> {
        self.command_tx.subscribe()
    }

    /// Subscribe to session snapshot updates
    pub fn subscribe_snapshots(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Switch to another screen. The timer keeps running underneath.
    pub fn navigate(&self, target: Screen) -> Result<Screen, String> {
        let mut screen = self.screen.lock()
            .map_err(|e| format!("Failed to lock screen state: {}", e))?;

        if *screen != target {
            info!("Navigating from {:?} to {:?}", *screen, target);
        }
        *screen = target;
        drop(screen);

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(format!("navigate:{:?}", target));
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(target)
    }

    /// Get the screen currently shown
    pub fn current_screen(&self) -> Result<Screen, String> {
        self.screen.lock()
            .map(|screen| *screen)
            .map_err(|e| format!("Failed to lock screen state: {}", e))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("session", &self.session)
            .field("screen", &self.screen)
            .field("port", &self.port)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{services::MockHaptic, state::Phase};

    fn app_state(haptic: MockHaptic) -> AppState {
        let config = SessionConfig::new(2000, 2000, 2, 1000).unwrap();
        AppState::new(20554, "127.0.0.1".to_string(), config, Arc::new(haptic))
    }

    #[test]
    fn test_start_pause_records_action_and_broadcasts() {
        let state = app_state(MockHaptic::new());
        let mut commands = state.subscribe_commands();

        let snapshot = state.start_pause().unwrap();
        assert!(snapshot.exercise_running);
        assert_eq!(
            commands.try_recv().unwrap(),
            SessionCommand::StartPause { phase: Phase::Exercise, running: true }
        );
        assert_eq!(state.get_last_action().0.as_deref(), Some("start"));

        state.start_pause().unwrap();
        assert_eq!(state.get_last_action().0.as_deref(), Some("pause"));
    }

    #[test]
    fn test_tick_publishes_snapshot() {
        let state = app_state(MockHaptic::new());
        let snapshots = state.subscribe_snapshots();

        state.start_pause().unwrap();
        assert!(matches!(
            state.tick().unwrap(),
            TickOutcome::Decremented { phase: Phase::Exercise, remaining_ms: 1000 }
        ));
        assert_eq!(snapshots.borrow().exercise_remaining_ms, 1000);
        assert_eq!(state.get_snapshot().unwrap().exercise_remaining_ms, 1000);
    }

    #[test]
    fn test_phase_completion_pulses_haptic() {
        let mut haptic = MockHaptic::new();
        haptic.expect_vibrate().times(1).returning(|_| Ok(()));
        let state = app_state(haptic);

        state.start_pause().unwrap();
        state.tick().unwrap();
        state.tick().unwrap();
        assert_eq!(
            state.tick().unwrap(),
            TickOutcome::PhaseCompleted { phase: Phase::Exercise }
        );
        assert!(state.get_snapshot().unwrap().rest_running);
    }

    #[test]
    fn test_reset_is_not_a_tick() {
        let state = app_state(MockHaptic::new());
        state.start_pause().unwrap();
        state.tick().unwrap();

        let snapshot = state.reset().unwrap();
        assert_eq!(snapshot.exercise_remaining_ms, 2000);
        assert_eq!(snapshot.running_phase(), None);
        assert_eq!(state.get_last_action().0.as_deref(), Some("reset"));
        assert_eq!(state.tick().unwrap(), TickOutcome::Idle);
    }

    #[test]
    fn test_navigation_leaves_session_alone() {
        let state = app_state(MockHaptic::new());
        state.start_pause().unwrap();
        let before = state.get_snapshot().unwrap();

        assert_eq!(state.current_screen().unwrap(), Screen::StartPage);
        state.navigate(Screen::SelectRestTime).unwrap();
        assert_eq!(state.current_screen().unwrap(), Screen::SelectRestTime);
        assert_eq!(state.get_snapshot().unwrap(), before);
    }

    #[test]
    fn test_uptime_format() {
        let state = app_state(MockHaptic::new());
        assert!(state.get_uptime().ends_with('s'));
        assert_eq!(state.tick_interval().unwrap(), Duration::from_millis(1000));
    }
}
