//! Exercise/rest interval state machine
//!
//! The session alternates an exercise countdown and a rest countdown for a
//! fixed number of repetitions. It is driven from outside: a scheduler calls
//! [`TimerSession::tick`] once per tick interval and the user issues
//! Start/Pause and Reset commands. The session never sleeps or spawns.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::RestResetPolicy,
    services::{Haptic, PulsePattern},
};

/// One of the two alternating countdown segments of a repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Exercise,
    Rest,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Exercise => "exercise",
            Phase::Rest => "rest",
        }
    }
}

/// Immutable timer configuration, fixed when the session is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    exercise_duration_ms: u64,
    rest_duration_ms: u64,
    total_repetitions: u32,
    tick_ms: u64,
    pulse_pattern: PulsePattern,
    rest_reset: RestResetPolicy,
}

impl SessionConfig {
    /// Create a configuration with the default one-shot pulse and rest reset policy
    pub fn new(
        exercise_duration_ms: u64,
        rest_duration_ms: u64,
        total_repetitions: u32,
        tick_ms: u64,
    ) -> Result<Self, String> {
        if exercise_duration_ms == 0 {
            return Err("exercise duration must be positive".to_string());
        }
        if rest_duration_ms == 0 {
            return Err("rest duration must be positive".to_string());
        }
        if total_repetitions == 0 {
            return Err("repetitions must be positive".to_string());
        }
        if tick_ms == 0 {
            return Err("tick interval must be positive".to_string());
        }

        Ok(Self {
            exercise_duration_ms,
            rest_duration_ms,
            total_repetitions,
            tick_ms,
            pulse_pattern: PulsePattern::default(),
            rest_reset: RestResetPolicy::default(),
        })
    }

    /// Replace the vibration pattern fired on phase completion
    pub fn with_pulse_pattern(mut self, pattern: PulsePattern) -> Result<Self, String> {
        if !pattern.has_pulse() {
            return Err("vibration pattern must contain a non-zero pulse".to_string());
        }
        self.pulse_pattern = pattern;
        Ok(self)
    }

    /// Choose what Reset restores into the rest countdown
    pub fn with_rest_reset(mut self, policy: RestResetPolicy) -> Self {
        self.rest_reset = policy;
        self
    }

    pub fn exercise_duration_ms(&self) -> u64 {
        self.exercise_duration_ms
    }

    pub fn rest_duration_ms(&self) -> u64 {
        self.rest_duration_ms
    }

    pub fn total_repetitions(&self) -> u32 {
        self.total_repetitions
    }

    pub fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    pub fn pulse_pattern(&self) -> &[u64] {
        self.pulse_pattern.as_slice()
    }

    pub fn rest_reset(&self) -> RestResetPolicy {
        self.rest_reset
    }

    /// Rest countdown value written by Reset
    fn rest_reset_ms(&self) -> u64 {
        match self.rest_reset {
            RestResetPolicy::RestDuration => self.rest_duration_ms,
            RestResetPolicy::ExerciseDuration => self.exercise_duration_ms,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            exercise_duration_ms: 3000,
            rest_duration_ms: 3000,
            total_repetitions: 3,
            tick_ms: 1000,
            pulse_pattern: PulsePattern::default(),
            rest_reset: RestResetPolicy::default(),
        }
    }
}

/// What a single tick did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing is running
    Idle,
    /// The running phase counted down by one step
    Decremented { phase: Phase, remaining_ms: u64 },
    /// Exercise finished and rest started
    PhaseCompleted { phase: Phase },
    /// Rest finished and the next exercise started
    RepetitionCompleted { repetitions_remaining: u32 },
    /// The last rest finished; the session is idle with repetitions restored
    CycleCompleted,
}

impl TickOutcome {
    /// Whether the session is still running after this tick
    pub fn keeps_running(&self) -> bool {
        matches!(
            self,
            TickOutcome::Decremented { .. }
                | TickOutcome::PhaseCompleted { .. }
                | TickOutcome::RepetitionCompleted { .. }
        )
    }
}

/// Observable copy of the session, published to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub exercise_remaining_ms: u64,
    pub rest_remaining_ms: u64,
    pub repetitions_remaining: u32,
    pub total_repetitions: u32,
    pub active_phase: Phase,
    pub exercise_running: bool,
    pub rest_running: bool,
}

impl SessionSnapshot {
    /// The phase currently counting down, if any
    pub fn running_phase(&self) -> Option<Phase> {
        if self.exercise_running {
            Some(Phase::Exercise)
        } else if self.rest_running {
            Some(Phase::Rest)
        } else {
            None
        }
    }
}

/// Exercise/rest interval timer session
#[derive(Debug, Clone)]
pub struct TimerSession {
    config: SessionConfig,
    exercise_remaining_ms: u64,
    rest_remaining_ms: u64,
    repetitions_remaining: u32,
    active_phase: Phase,
    // Qualified by `active_phase`, so only one phase can ever be running.
    running: bool,
}

impl TimerSession {
    /// Create an idle session positioned at the start of the first exercise
    pub fn new(config: SessionConfig) -> Self {
        Self {
            exercise_remaining_ms: config.exercise_duration_ms,
            rest_remaining_ms: config.rest_duration_ms,
            repetitions_remaining: config.total_repetitions,
            active_phase: Phase::Exercise,
            running: false,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn exercise_remaining_ms(&self) -> u64 {
        self.exercise_remaining_ms
    }

    pub fn rest_remaining_ms(&self) -> u64 {
        self.rest_remaining_ms
    }

    pub fn repetitions_remaining(&self) -> u32 {
        self.repetitions_remaining
    }

    pub fn active_phase(&self) -> Phase {
        self.active_phase
    }

    pub fn exercise_running(&self) -> bool {
        self.running && self.active_phase == Phase::Exercise
    }

    pub fn rest_running(&self) -> bool {
        self.running && self.active_phase == Phase::Rest
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            exercise_remaining_ms: self.exercise_remaining_ms,
            rest_remaining_ms: self.rest_remaining_ms,
            repetitions_remaining: self.repetitions_remaining,
            total_repetitions: self.config.total_repetitions,
            active_phase: self.active_phase,
            exercise_running: self.exercise_running(),
            rest_running: self.rest_running(),
        }
    }

    /// Toggle the running flag of the active phase. Returns the new flag.
    pub fn start_pause(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Stop both phases and restore countdowns and repetitions.
    ///
    /// The active phase is left untouched, so a reset during rest leaves
    /// the next Start/Pause resuming the rest phase.
    pub fn reset(&mut self) {
        self.running = false;
        self.exercise_remaining_ms = self.config.exercise_duration_ms;
        self.rest_remaining_ms = self.config.rest_reset_ms();
        self.repetitions_remaining = self.config.total_repetitions;
    }

    /// Advance the session by one tick.
    ///
    /// A running phase with time left counts down by `tick_ms`, clamped at
    /// zero. A running phase already at zero completes on this tick: the
    /// haptic pulse fires and the other phase takes over. Repetitions are
    /// counted down only when a rest phase completes, so one exercise plus
    /// one rest make up one repetition.
    pub fn tick(&mut self, haptic: &dyn Haptic) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        match self.active_phase {
            Phase::Exercise if self.exercise_remaining_ms == 0 => {
                self.exercise_remaining_ms = self.config.exercise_duration_ms;
                self.pulse(haptic);
                self.active_phase = Phase::Rest;
                TickOutcome::PhaseCompleted { phase: Phase::Exercise }
            }
            Phase::Exercise => {
                self.exercise_remaining_ms =
                    self.exercise_remaining_ms.saturating_sub(self.config.tick_ms);
                TickOutcome::Decremented {
                    phase: Phase::Exercise,
                    remaining_ms: self.exercise_remaining_ms,
                }
            }
            Phase::Rest if self.rest_remaining_ms == 0 => {
                self.rest_remaining_ms = self.config.rest_duration_ms;
                self.repetitions_remaining = self.repetitions_remaining.saturating_sub(1);
                self.pulse(haptic);
                self.active_phase = Phase::Exercise;

                if self.repetitions_remaining != 0 {
                    TickOutcome::RepetitionCompleted {
                        repetitions_remaining: self.repetitions_remaining,
                    }
                } else {
                    self.running = false;
                    self.repetitions_remaining = self.config.total_repetitions;
                    TickOutcome::CycleCompleted
                }
            }
            Phase::Rest => {
                self.rest_remaining_ms = self.rest_remaining_ms.saturating_sub(self.config.tick_ms);
                TickOutcome::Decremented {
                    phase: Phase::Rest,
                    remaining_ms: self.rest_remaining_ms,
                }
            }
        }
    }

    fn pulse(&self, haptic: &dyn Haptic) {
        if let Err(e) = haptic.vibrate(self.config.pulse_pattern()) {
            debug!("Haptic pulse failed: {}", e);
        }
    }
}
