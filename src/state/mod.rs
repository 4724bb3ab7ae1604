//! State management module
//!
//! This module contains the interval timer session, the shared application
//! state wrapping it, and the notifications published to background tasks.

pub mod app_state;
pub mod events;
pub mod navigation;
pub mod session;

// Re-export main types
pub use app_state::AppState;
pub use events::SessionCommand;
pub use navigation::Screen;
pub use session::{Phase, SessionConfig, SessionSnapshot, TickOutcome, TimerSession};
