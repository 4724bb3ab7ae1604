//! Display string formatting

use crate::state::SessionSnapshot;

const MS_PER_SECOND: u64 = 1000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;

/// Format a millisecond countdown as `"MM : SS"`
pub fn format_duration(ms: u64) -> String {
    let minutes = ms / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    format!("{:02} : {:02}", minutes, seconds)
}

/// Render the start page read-out for a snapshot
pub fn display_line(snapshot: &SessionSnapshot) -> String {
    format!(
        "Exercise {} | Rest {} | Reps {}",
        format_duration(snapshot.exercise_remaining_ms),
        format_duration(snapshot.rest_remaining_ms),
        snapshot.repetitions_remaining,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SessionConfig, TimerSession};

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00 : 00");
        assert_eq!(format_duration(65_000), "01 : 05");
        assert_eq!(format_duration(599_000), "09 : 59");
        assert_eq!(format_duration(3_000), "00 : 03");
    }

    #[test]
    fn test_format_duration_truncates_partial_seconds() {
        assert_eq!(format_duration(999), "00 : 00");
        assert_eq!(format_duration(59_999), "00 : 59");
        assert_eq!(format_duration(6_000_000), "100 : 00");
    }

    #[test]
    fn test_display_line() {
        let session = TimerSession::new(SessionConfig::new(65_000, 30_000, 4, 1000).unwrap());
        assert_eq!(
            display_line(&session.snapshot()),
            "Exercise 01 : 05 | Rest 00 : 30 | Reps 4"
        );
    }
}
