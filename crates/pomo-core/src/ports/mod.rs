mod tick_scheduler;

pub use tick_scheduler::{apply_tick_events, TickScheduler};
