//! Haptic feedback capability
//!
//! Vibration is fire-and-forget: implementations must not block, and the
//! timer never waits on or retries a pulse.

use tokio::process::Command;
use tracing::{debug, info};

/// Alternating off/on durations in milliseconds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulsePattern(Vec<u64>);

impl PulsePattern {
    pub fn new(durations: Vec<u64>) -> Self {
        Self(durations)
    }

    /// A single full-amplitude pulse with no leading pause
    pub fn one_shot(pulse_ms: u64) -> Self {
        Self(vec![0, pulse_ms])
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    /// Check that at least one "on" segment has a duration
    pub fn has_pulse(&self) -> bool {
        self.0.iter().skip(1).step_by(2).any(|&ms| ms > 0)
    }
}

impl Default for PulsePattern {
    fn default() -> Self {
        Self::one_shot(100)
    }
}

/// Device capability used to signal phase completion
#[cfg_attr(test, mockall::automock)]
pub trait Haptic: Send + Sync {
    /// Start a vibration with the given off/on pattern and return immediately
    fn vibrate(&self, pattern: &[u64]) -> Result<(), String>;
}

/// Haptic backend for hosts without a vibration motor; only logs the pulse
#[derive(Debug, Default, Clone)]
pub struct LogHaptic;

impl Haptic for LogHaptic {
    fn vibrate(&self, pattern: &[u64]) -> Result<(), String> {
        info!("Vibrate: pattern {:?}", pattern);
        Ok(())
    }
}

/// Haptic backend that hands the pattern to an external program
#[derive(Debug, Clone)]
pub struct CommandHaptic {
    program: String,
}

impl CommandHaptic {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Haptic for CommandHaptic {
    fn vibrate(&self, pattern: &[u64]) -> Result<(), String> {
        debug!("Spawning {} for pattern {:?}", self.program, pattern);

        let mut child = Command::new(&self.program)
            .args(pattern.iter().map(|ms| ms.to_string()))
            .spawn()
            .map_err(|e| format!("Failed to execute {}: {}", self.program, e))?;

        // Reap the child in the background; its exit status is not our concern
        let program = self.program.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => debug!("{} exited with {}", program, status),
                Err(e) => debug!("Failed to wait for {}: {}", program, e),
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_pattern() {
        let pattern = PulsePattern::one_shot(100);
        assert_eq!(pattern.as_slice(), &[0, 100]);
        assert!(pattern.has_pulse());
        assert_eq!(PulsePattern::default(), pattern);
    }

    #[test]
    fn test_pattern_without_on_segment() {
        assert!(!PulsePattern::new(vec![]).has_pulse());
        assert!(!PulsePattern::new(vec![500]).has_pulse());
        assert!(!PulsePattern::one_shot(0).has_pulse());
        assert!(PulsePattern::new(vec![0, 500, 50, 300]).has_pulse());
    }

    #[test]
    fn test_log_haptic_never_fails() {
        assert!(LogHaptic.vibrate(&[0, 100]).is_ok());
    }

    #[tokio::test]
    async fn test_command_haptic_reports_missing_program() {
        let haptic = CommandHaptic::new("/nonexistent/interval-timer-vibrate");
        let err = haptic.vibrate(&[0, 100]).unwrap_err();
        assert!(err.contains("/nonexistent/interval-timer-vibrate"));
    }
}
