//! Configuration and CLI argument handling

use anyhow::anyhow;
use clap::{Parser, ValueEnum};

use crate::{services::PulsePattern, state::SessionConfig};

/// What the Reset command writes into the rest countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RestResetPolicy {
    /// Restore the configured rest duration
    #[default]
    RestDuration,
    /// Reuse the exercise duration (legacy watch behavior)
    ExerciseDuration,
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "interval-timer")]
#[command(about = "An exercise/rest interval timer with haptic phase alerts")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Exercise phase duration in milliseconds
    #[arg(short, long, default_value = "3000")]
    pub exercise_ms: u64,

    /// Rest phase duration in milliseconds
    #[arg(short, long, default_value = "3000")]
    pub rest_ms: u64,

    /// Number of exercise+rest repetitions per cycle
    #[arg(short = 'n', long, default_value = "3")]
    pub repetitions: u32,

    /// Tick interval (and countdown step) in milliseconds
    #[arg(long, default_value = "1000")]
    pub tick_ms: u64,

    /// Length of the vibration pulse fired on phase completion
    #[arg(long, default_value = "100")]
    pub pulse_ms: u64,

    /// Value restored into the rest countdown on reset
    #[arg(long, value_enum, default_value_t = RestResetPolicy::RestDuration)]
    pub rest_reset: RestResetPolicy,

    /// External program invoked with the vibration pattern as arguments
    #[arg(long)]
    pub haptic_command: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Build the immutable session configuration from the CLI values
    pub fn session_config(&self) -> anyhow::Result<SessionConfig> {
        SessionConfig::new(
            self.exercise_ms,
            self.rest_ms,
            self.repetitions,
            self.tick_ms,
        )
        .and_then(|config| config.with_pulse_pattern(PulsePattern::one_shot(self.pulse_ms)))
        .map(|config| config.with_rest_reset(self.rest_reset))
        .map_err(|e| anyhow!("Invalid timer configuration: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_watch_app() {
        let config = Config::try_parse_from(["interval-timer"]).unwrap();
        assert_eq!(config.exercise_ms, 3000);
        assert_eq!(config.rest_ms, 3000);
        assert_eq!(config.repetitions, 3);
        assert_eq!(config.tick_ms, 1000);
        assert_eq!(config.rest_reset, RestResetPolicy::RestDuration);
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.log_level(), "info");

        let session = config.session_config().unwrap();
        assert_eq!(session.pulse_pattern(), &[0, 100]);
    }

    #[test]
    fn test_legacy_rest_reset_flag() {
        let config = Config::try_parse_from([
            "interval-timer",
            "--rest-reset",
            "exercise-duration",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.rest_reset, RestResetPolicy::ExerciseDuration);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(
            config.session_config().unwrap().rest_reset(),
            RestResetPolicy::ExerciseDuration
        );
    }

    #[test]
    fn test_zero_repetitions_rejected() {
        let config = Config::try_parse_from(["interval-timer", "-n", "0"]).unwrap();
        let err = config.session_config().unwrap_err();
        assert!(err.to_string().contains("repetitions"));
    }

    #[test]
    fn test_zero_pulse_rejected() {
        let config = Config::try_parse_from(["interval-timer", "--pulse-ms", "0"]).unwrap();
        assert!(config.session_config().is_err());
    }
}
