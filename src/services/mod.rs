//! External device services
//!
//! This module contains the haptic capability the timer signals phase
//! completion through, and its backends.

pub mod haptic;

// Re-export main types
pub use haptic::{CommandHaptic, Haptic, LogHaptic, PulsePattern};

#[cfg(test)]
pub use haptic::MockHaptic;
