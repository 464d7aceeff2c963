use std::time::Duration;

use crate::domain::EngineEvent;

/// Source of the periodic tick that drives a [`crate::SessionEngine`].
///
/// The host owns the scheduler. The engine only announces, through
/// [`EngineEvent::TicksRequested`] and [`EngineEvent::TicksHalted`], when it
/// wants ticks to flow.
pub trait TickScheduler {
    fn register_tick(&mut self, interval: Duration);

    fn cancel_tick(&mut self);
}

/// Forwards the tick directives found in `events` to `scheduler`, in order.
pub fn apply_tick_events(events: &[EngineEvent], scheduler: &mut dyn TickScheduler) {
    for event in events.iter().filter(|event| event.is_tick_directive()) {
        match event {
            EngineEvent::TicksRequested { interval_ms } => {
                scheduler.register_tick(Duration::from_millis(*interval_ms));
            }
            EngineEvent::TicksHalted => scheduler.cancel_tick(),
            _ => {}
        }
    }
}
