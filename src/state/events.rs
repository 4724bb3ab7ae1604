//! User commands broadcast to background tasks

use serde::{Deserialize, Serialize};

use super::Phase;

/// A user command that was applied to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionCommand {
    /// Start/Pause toggled the active phase to `running`
    StartPause { phase: Phase, running: bool },
    /// Both phases stopped and counters restored
    Reset,
}

impl SessionCommand {
    /// Name recorded as the last action
    pub fn action_name(&self) -> &'static str {
        match self {
            SessionCommand::StartPause { running: true, .. } => "start",
            SessionCommand::StartPause { running: false, .. } => "pause",
            SessionCommand::Reset => "reset",
        }
    }
}
