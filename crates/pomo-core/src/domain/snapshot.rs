use serde::{Deserialize, Serialize};

use super::{PhaseKind, SessionDurations};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Idle,
    Running,
    Paused,
}

impl EngineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineState::Idle => "idle",
            EngineState::Running => "running",
            EngineState::Paused => "paused",
        }
    }
}

/// Read-only view of the engine, taken after a command or a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub phase: PhaseKind,
    pub state: EngineState,
    /// `MM:SS` of the remaining time, empty while the blink is hidden.
    pub remaining_display: String,
    pub time_limit_ms: u64,
    pub elapsed_ms: u64,
    pub paused: bool,
    pub blink_visible: bool,
    pub total_pomodoro_count: u32,
    pub total_pomodoro_minutes: u64,
    pub total_non_pomodoro_minutes: u64,
    /// Raw side activity time, including the unfinished current run.
    pub non_pomodoro_elapsed_ms: u64,
    pub pomodoros_until_long_break: u32,
    pub interruption_count: usize,
    pub interruption_markers: String,
    pub task_minutes: u64,
    pub side_activity_active: bool,
    pub side_activity_minutes: u64,
    /// Durations and cadence the engine currently runs with.
    pub durations: SessionDurations,
}

impl EngineSnapshot {
    pub fn is_active(&self) -> bool {
        !matches!(self.state, EngineState::Idle)
    }

    /// Window title for the shell, e.g. `⬢ 24:59`.
    pub fn title(&self) -> String {
        if self.remaining_display.is_empty() {
            self.phase.symbol().to_string()
        } else {
            format!("{} {}", self.phase.symbol(), self.remaining_display)
        }
    }
}
