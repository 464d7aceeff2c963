use serde::{Deserialize, Serialize};

pub const INTERRUPTION_MARKER: &str = "\u{2b24}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterruptionMarker {
    /// Pomodoro time already spent when the pause happened.
    pub at_elapsed_ms: u64,
}

/// Pauses recorded during the current pomodoro, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterruptionLog {
    markers: Vec<InterruptionMarker>,
}

impl InterruptionLog {
    pub fn record(&mut self, at_elapsed_ms: u64) {
        self.markers.push(InterruptionMarker { at_elapsed_ms });
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn markers(&self) -> &[InterruptionMarker] {
        &self.markers
    }

    pub fn render(&self) -> String {
        self.markers
            .iter()
            .map(|_| format!("{INTERRUPTION_MARKER} "))
            .collect()
    }
}
