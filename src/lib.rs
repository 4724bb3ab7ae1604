//! Interval Timer - An exercise/rest interval timer with haptic phase alerts
//!
//! This library provides the exercise/rest state machine, the ticker that
//! drives it, the haptic capability it signals through, and an HTTP surface
//! for the Start/Pause and Reset controls.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerSession};
pub use api::create_router;
pub use utils::{format_duration, shutdown_signal};
