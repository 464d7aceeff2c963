//! Pomo core library
//!
//! Contains the Pomodoro session engine, its domain types, configuration and
//! the tick scheduler port. This crate has no knowledge of timers, sockets or
//! desktop notifications.

pub mod config;
pub mod domain;
pub mod engine;
pub mod ports;

pub use config::{Config, ConfigError, NotificationConfig, NotificationUrgency, TimerConfig};
pub use domain::{
    format_countdown, ConfigureError, Cue, EngineEvent, EngineSnapshot, EngineState, PhaseKind,
    SessionDurations,
};
pub use engine::{Command, SessionEngine, DEFAULT_TICK_INTERVAL_MS};
pub use ports::{apply_tick_events, TickScheduler};
