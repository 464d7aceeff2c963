use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PhaseKind;

pub const MILLIS_PER_MINUTE: u64 = 60_000;
pub const MAX_DURATION_MINUTES: u64 = 24 * 60;
pub const MAX_LONG_BREAK_AFTER: u32 = 99;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigureError {
    #[error("{phase} duration must be between 1 and {max} minutes, got {minutes}")]
    DurationOutOfRange {
        phase: PhaseKind,
        minutes: u64,
        max: u64,
    },

    #[error("long break cadence must be between 1 and {max} pomodoros, got {value}")]
    CadenceOutOfRange { value: u32, max: u32 },

    #[error("cannot reconfigure while a {phase} is in progress")]
    SessionInProgress { phase: PhaseKind },
}

/// Validated phase durations plus the long break cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDurations {
    pomodoro_minutes: u64,
    short_break_minutes: u64,
    long_break_minutes: u64,
    long_break_after: u32,
}

impl SessionDurations {
    pub fn new(
        pomodoro_minutes: u64,
        short_break_minutes: u64,
        long_break_minutes: u64,
        long_break_after: u32,
    ) -> Result<Self, ConfigureError> {
        for (phase, minutes) in [
            (PhaseKind::Pomodoro, pomodoro_minutes),
            (PhaseKind::ShortBreak, short_break_minutes),
            (PhaseKind::LongBreak, long_break_minutes),
        ] {
            if minutes == 0 || minutes > MAX_DURATION_MINUTES {
                return Err(ConfigureError::DurationOutOfRange {
                    phase,
                    minutes,
                    max: MAX_DURATION_MINUTES,
                });
            }
        }

        if long_break_after == 0 || long_break_after > MAX_LONG_BREAK_AFTER {
            return Err(ConfigureError::CadenceOutOfRange {
                value: long_break_after,
                max: MAX_LONG_BREAK_AFTER,
            });
        }

        Ok(Self {
            pomodoro_minutes,
            short_break_minutes,
            long_break_minutes,
            long_break_after,
        })
    }

    pub fn minutes_for(&self, kind: PhaseKind) -> u64 {
        match kind {
            PhaseKind::Pomodoro => self.pomodoro_minutes,
            PhaseKind::ShortBreak => self.short_break_minutes,
            PhaseKind::LongBreak => self.long_break_minutes,
        }
    }

    pub fn limit_ms_for(&self, kind: PhaseKind) -> u64 {
        self.minutes_for(kind) * MILLIS_PER_MINUTE
    }

    pub fn long_break_after(&self) -> u32 {
        self.long_break_after
    }
}

impl Default for SessionDurations {
    fn default() -> Self {
        Self {
            pomodoro_minutes: 30,
            short_break_minutes: 6,
            long_break_minutes: 60,
            long_break_after: 6,
        }
    }
}

/// Rounds a millisecond amount to whole minutes, ties to even.
pub fn round_to_minutes(milliseconds: u64) -> u64 {
    (milliseconds as f64 / MILLIS_PER_MINUTE as f64).round_ties_even() as u64
}

/// Formats milliseconds as `MM:SS`; minutes keep counting past 59.
pub fn format_countdown(milliseconds: u64) -> String {
    let total_seconds = milliseconds / 1_000;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_durations_match_classic_setup() {
        let durations = SessionDurations::default();

        assert_eq!(durations.minutes_for(PhaseKind::Pomodoro), 30);
        assert_eq!(durations.minutes_for(PhaseKind::ShortBreak), 6);
        assert_eq!(durations.minutes_for(PhaseKind::LongBreak), 60);
        assert_eq!(durations.long_break_after(), 6);
    }

    #[test]
    fn limit_is_expressed_in_milliseconds() {
        let durations = SessionDurations::new(25, 5, 15, 4).unwrap();

        assert_eq!(durations.limit_ms_for(PhaseKind::Pomodoro), 1_500_000);
        assert_eq!(durations.limit_ms_for(PhaseKind::ShortBreak), 300_000);
    }

    #[test]
    fn zero_duration_is_rejected() {
        let result = SessionDurations::new(25, 0, 15, 4);

        assert_eq!(
            result,
            Err(ConfigureError::DurationOutOfRange {
                phase: PhaseKind::ShortBreak,
                minutes: 0,
                max: MAX_DURATION_MINUTES,
            })
        );
    }

    #[test]
    fn oversized_duration_is_rejected() {
        let result = SessionDurations::new(25, 5, MAX_DURATION_MINUTES + 1, 4);

        assert!(matches!(
            result,
            Err(ConfigureError::DurationOutOfRange {
                phase: PhaseKind::LongBreak,
                ..
            })
        ));
    }

    #[test]
    fn zero_cadence_is_rejected() {
        let result = SessionDurations::new(25, 5, 15, 0);

        assert!(matches!(
            result,
            Err(ConfigureError::CadenceOutOfRange { value: 0, .. })
        ));
    }

    #[test]
    fn rounding_goes_to_nearest_minute() {
        assert_eq!(round_to_minutes(0), 0);
        assert_eq!(round_to_minutes(29_999), 0);
        assert_eq!(round_to_minutes(30_500), 1);
        assert_eq!(round_to_minutes(1_500_000), 25);
    }

    #[test]
    fn rounding_ties_go_to_even_minute() {
        assert_eq!(round_to_minutes(30_000), 0);
        assert_eq!(round_to_minutes(90_000), 2);
        assert_eq!(round_to_minutes(150_000), 2);
    }

    #[test]
    fn countdown_formats_minutes_and_seconds() {
        assert_eq!(format_countdown(0), "00:00");
        assert_eq!(format_countdown(1_500_000), "25:00");
        assert_eq!(format_countdown(61_500), "01:01");
    }

    #[test]
    fn countdown_does_not_wrap_hours() {
        assert_eq!(format_countdown(60 * MILLIS_PER_MINUTE), "60:00");
        assert_eq!(format_countdown(125 * MILLIS_PER_MINUTE), "125:00");
    }
}
