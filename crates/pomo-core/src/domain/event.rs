use serde::{Deserialize, Serialize};

use super::PhaseKind;

/// Something the engine did in response to a command or a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    PhaseStarted(PhaseKind),
    RoutineTick(PhaseKind),
    TimeExceeded(PhaseKind),
    PhaseChanged { from: PhaseKind, to: PhaseKind },
    InterruptionRecorded,
    PomodoroResumed,
    SideActivityStarted,
    SideActivityTick { elapsed_ms: u64 },
    SideActivityStopped { credited_minutes: u64 },
    TicksRequested { interval_ms: u64 },
    TicksHalted,
}

/// Presentation-side effect an event calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    Ticking,
    /// Break overtime.
    Alarm,
    /// Pomodoro overtime.
    TimeExceeded,
    Silence,
}

impl EngineEvent {
    pub fn cue(&self) -> Option<Cue> {
        match self {
            EngineEvent::RoutineTick(_) | EngineEvent::SideActivityTick { .. } => {
                Some(Cue::Ticking)
            }
            EngineEvent::TimeExceeded(kind) if kind.is_break() => Some(Cue::Alarm),
            EngineEvent::TimeExceeded(_) => Some(Cue::TimeExceeded),
            EngineEvent::PhaseChanged { .. } | EngineEvent::InterruptionRecorded => {
                Some(Cue::Silence)
            }
            _ => None,
        }
    }

    pub fn is_tick_directive(&self) -> bool {
        matches!(
            self,
            EngineEvent::TicksRequested { .. } | EngineEvent::TicksHalted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routine_ticks_map_to_ticking_cue() {
        for kind in PhaseKind::ALL {
            assert_eq!(EngineEvent::RoutineTick(kind).cue(), Some(Cue::Ticking));
        }
        assert_eq!(
            EngineEvent::SideActivityTick { elapsed_ms: 500 }.cue(),
            Some(Cue::Ticking)
        );
    }

    #[test]
    fn overtime_cue_differs_per_phase_kind() {
        assert_eq!(
            EngineEvent::TimeExceeded(PhaseKind::Pomodoro).cue(),
            Some(Cue::TimeExceeded)
        );
        assert_eq!(
            EngineEvent::TimeExceeded(PhaseKind::ShortBreak).cue(),
            Some(Cue::Alarm)
        );
        assert_eq!(
            EngineEvent::TimeExceeded(PhaseKind::LongBreak).cue(),
            Some(Cue::Alarm)
        );
    }

    #[test]
    fn phase_change_and_pause_silence_sounds() {
        let change = EngineEvent::PhaseChanged {
            from: PhaseKind::Pomodoro,
            to: PhaseKind::ShortBreak,
        };

        assert_eq!(change.cue(), Some(Cue::Silence));
        assert_eq!(EngineEvent::InterruptionRecorded.cue(), Some(Cue::Silence));
    }

    #[test]
    fn tick_directives_carry_no_cue() {
        let requested = EngineEvent::TicksRequested { interval_ms: 500 };

        assert!(requested.is_tick_directive());
        assert!(EngineEvent::TicksHalted.is_tick_directive());
        assert_eq!(requested.cue(), None);
        assert!(!EngineEvent::PomodoroResumed.is_tick_directive());
    }
}
