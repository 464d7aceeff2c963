use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl PhaseKind {
    pub const ALL: [PhaseKind; 3] = [
        PhaseKind::Pomodoro,
        PhaseKind::ShortBreak,
        PhaseKind::LongBreak,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::Pomodoro => "pomodoro",
            PhaseKind::ShortBreak => "short-break",
            PhaseKind::LongBreak => "long-break",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PhaseKind::Pomodoro => "Pomodoro",
            PhaseKind::ShortBreak => "Short Break",
            PhaseKind::LongBreak => "Long Break",
        }
    }

    /// Prefix shown next to the countdown.
    pub fn symbol(&self) -> &'static str {
        match self {
            PhaseKind::Pomodoro => "\u{2b22}",
            PhaseKind::ShortBreak => "\u{25b2}",
            PhaseKind::LongBreak => "\u{25bc}",
        }
    }

    /// Foreground color of the countdown, as a CSS color name.
    pub fn color(&self) -> &'static str {
        match self {
            PhaseKind::Pomodoro => "orangered",
            PhaseKind::ShortBreak => "yellow",
            PhaseKind::LongBreak => "green",
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, PhaseKind::Pomodoro)
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            PhaseKind::Pomodoro => 0,
            PhaseKind::ShortBreak => 1,
            PhaseKind::LongBreak => 2,
        }
    }
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-kind bookkeeping for one occurrence of a phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    pub kind: PhaseKind,
    pub time_limit_ms: u64,
    pub elapsed_ms: u64,
    pub started: bool,
    pub paused: bool,
    pub blink_visible: bool,
}

impl Phase {
    pub fn new(kind: PhaseKind, time_limit_ms: u64) -> Self {
        Self {
            kind,
            time_limit_ms,
            elapsed_ms: 0,
            started: false,
            paused: false,
            blink_visible: true,
        }
    }

    /// Puts the phase back to the state of a fresh entry.
    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
        self.started = false;
        self.paused = false;
        self.blink_visible = true;
    }

    pub fn is_overtime(&self) -> bool {
        self.elapsed_ms >= self.time_limit_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.time_limit_ms.saturating_sub(self.elapsed_ms)
    }

    pub fn is_running(&self) -> bool {
        self.started && !self.paused
    }
}
