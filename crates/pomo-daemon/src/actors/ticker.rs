use std::time::Duration;

use pomo_core::TickScheduler;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Tokio-backed tick source. Ticks that fire late are delivered in a burst
/// rather than dropped, so the engine never loses time.
#[derive(Default)]
pub struct IntervalScheduler {
    interval: Option<Interval>,
}

impl IntervalScheduler {
    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    /// Resolves on the next tick; never resolves while no tick is registered.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl TickScheduler for IntervalScheduler {
    fn register_tick(&mut self, period: Duration) {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
        self.interval = Some(interval);
    }

    fn cancel_tick(&mut self) {
        self.interval = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn registered_interval_ticks_after_one_period() {
        let mut scheduler = IntervalScheduler::default();
        scheduler.register_tick(Duration::from_millis(500));
        let started = Instant::now();

        scheduler.tick().await;

        assert_eq!(started.elapsed(), Duration::from_millis(500));
        assert!(scheduler.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_scheduler_never_ticks() {
        let mut scheduler = IntervalScheduler::default();
        scheduler.register_tick(Duration::from_millis(500));
        scheduler.cancel_tick();

        let result = tokio::time::timeout(Duration::from_secs(5), scheduler.tick()).await;

        assert!(result.is_err());
        assert!(!scheduler.is_active());
    }
}
