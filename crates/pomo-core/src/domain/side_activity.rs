use super::durations::round_to_minutes;

/// Timer for incidental work done outside the pomodoro cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideActivity {
    active: bool,
    elapsed_ms: u64,
}

impl SideActivity {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn elapsed_minutes(&self) -> u64 {
        round_to_minutes(self.elapsed_ms)
    }

    pub fn start(&mut self) {
        self.active = true;
    }

    pub fn advance(&mut self, interval_ms: u64) {
        if self.active {
            self.elapsed_ms += interval_ms;
        }
    }

    /// Stops the timer and returns the whole minutes to credit.
    pub fn stop(&mut self) -> u64 {
        let minutes = round_to_minutes(self.elapsed_ms);
        self.active = false;
        self.elapsed_ms = 0;
        minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_timer_ignores_ticks() {
        let mut activity = SideActivity::default();
        activity.advance(500);

        assert_eq!(activity.elapsed_ms(), 0);
    }

    #[test]
    fn stop_returns_rounded_minutes_and_resets() {
        let mut activity = SideActivity::default();
        activity.start();
        for _ in 0..200 {
            activity.advance(500);
        }

        assert_eq!(activity.elapsed_minutes(), 2);
        assert_eq!(activity.stop(), 2);
        assert!(!activity.is_active());
        assert_eq!(activity.elapsed_ms(), 0);
    }
}
