mod durations;
mod event;
mod interruption;
mod phase;
mod side_activity;
mod snapshot;
mod statistics;

pub use durations::{
    format_countdown, round_to_minutes, ConfigureError, SessionDurations, MAX_DURATION_MINUTES,
    MAX_LONG_BREAK_AFTER, MILLIS_PER_MINUTE,
};
pub use event::{Cue, EngineEvent};
pub use interruption::{InterruptionLog, InterruptionMarker, INTERRUPTION_MARKER};
pub use phase::{Phase, PhaseKind};
pub use side_activity::SideActivity;
pub use snapshot::{EngineSnapshot, EngineState};
pub use statistics::Statistics;
