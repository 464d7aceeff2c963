use super::durations::round_to_minutes;

/// Lifetime counters for one process run. None of them ever decreases,
/// except the per-task counter which restarts with each pomodoro.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total_pomodoro_count: u32,
    pub total_pomodoro_minutes: u64,
    pub total_non_pomodoro_minutes: u64,
    pub total_non_pomodoro_ms: u64,
    pub task_elapsed_ms: u64,
}

impl Statistics {
    pub fn record_pomodoro(&mut self, elapsed_ms: u64) {
        self.total_pomodoro_minutes += round_to_minutes(elapsed_ms);
        self.total_pomodoro_count += 1;
    }

    pub fn credit_non_pomodoro(&mut self, minutes: u64) {
        self.total_non_pomodoro_minutes += minutes;
    }

    pub fn task_minutes(&self) -> u64 {
        round_to_minutes(self.task_elapsed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_pomodoro_rounds_elapsed_time() {
        let mut statistics = Statistics::default();
        statistics.record_pomodoro(1_520_000);
        statistics.record_pomodoro(0);

        assert_eq!(statistics.total_pomodoro_count, 2);
        assert_eq!(statistics.total_pomodoro_minutes, 25);
    }

    #[test]
    fn non_pomodoro_credit_accumulates() {
        let mut statistics = Statistics::default();
        statistics.credit_non_pomodoro(3);
        statistics.credit_non_pomodoro(4);

        assert_eq!(statistics.total_non_pomodoro_minutes, 7);
    }

    #[test]
    fn task_minutes_round_task_time() {
        let statistics = Statistics {
            task_elapsed_ms: 95_000,
            ..Statistics::default()
        };

        assert_eq!(statistics.task_minutes(), 2);
    }
}
