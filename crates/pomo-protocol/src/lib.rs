//! Pomo protocol definitions for CLI-daemon communication
//!
//! This crate defines the IPC protocol between the pomo CLI and daemon.
//! Messages are bincode payloads preceded by a 4-byte little-endian length.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use pomo_core::{Command, EngineSnapshot, EngineState, PhaseKind};

/// Requests sent from CLI to daemon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Request {
    /// Start the current phase
    Start,
    /// Stop the current phase and move to the next one
    Stop,
    /// Bypass the current phase without running it
    Skip,
    /// Pause or resume the running pomodoro
    PauseResume,
    /// Start tracking non-pomodoro time
    StartSideActivity,
    /// Stop tracking non-pomodoro time
    StopSideActivity,
    /// Replace phase durations and long break cadence
    Configure {
        pomodoro_minutes: u64,
        short_break_minutes: u64,
        long_break_minutes: u64,
        long_break_after: u32,
    },
    /// Get the engine snapshot
    GetStatus,
    /// Ping the daemon to check if it's alive
    Ping,
}

impl Request {
    /// The engine command this request maps to, if any.
    pub fn command(&self) -> Option<Command> {
        match self {
            Request::Start => Some(Command::Start),
            Request::Stop => Some(Command::Stop),
            Request::Skip => Some(Command::Skip),
            Request::PauseResume => Some(Command::PauseResume),
            Request::StartSideActivity => Some(Command::StartSideActivity),
            Request::StopSideActivity => Some(Command::StopSideActivity),
            Request::Configure { .. } | Request::GetStatus | Request::Ping => None,
        }
    }
}

/// Responses sent from daemon to CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Response {
    /// The command changed the engine state
    Applied(EngineSnapshot),
    /// The command did not apply in the current state
    Ignored(EngineSnapshot),
    /// The configuration was refused; nothing changed
    Declined { reason: String },
    /// Current engine snapshot
    Status(EngineSnapshot),
    /// Error response with message
    Error { message: String },
    /// Pong response to ping
    Pong,
}

#[cfg(unix)]
pub fn default_socket_path() -> PathBuf {
    let uid = unsafe { libc::getuid() };
    PathBuf::from(format!("/run/user/{}/pomo.sock", uid))
}

#[cfg(windows)]
pub fn default_socket_path() -> PathBuf {
    let local_app_data = std::env::var("LOCALAPPDATA").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(format!(r"{}\pomo\pomo.sock", local_app_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomo_core::SessionEngine;

    #[test]
    fn command_requests_map_to_engine_commands() {
        assert_eq!(Request::Start.command(), Some(Command::Start));
        assert_eq!(Request::Skip.command(), Some(Command::Skip));
        assert_eq!(Request::PauseResume.command(), Some(Command::PauseResume));
        assert_eq!(
            Request::StopSideActivity.command(),
            Some(Command::StopSideActivity)
        );
        assert_eq!(Request::GetStatus.command(), None);
        assert_eq!(Request::Ping.command(), None);
    }

    #[test]
    fn request_configure_serialization() {
        let request = Request::Configure {
            pomodoro_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            long_break_after: 4,
        };

        let bytes = bincode::serialize(&request).unwrap();
        let decoded: Request = bincode::deserialize(&bytes).unwrap();

        assert_eq!(request, decoded);
    }

    #[test]
    fn response_status_carries_snapshot() {
        let mut engine = SessionEngine::default();
        engine.start();
        for _ in 0..3 {
            engine.on_tick();
        }
        let response = Response::Status(engine.snapshot());

        let bytes = bincode::serialize(&response).unwrap();
        let decoded: Response = bincode::deserialize(&bytes).unwrap();

        match decoded {
            Response::Status(snapshot) => {
                assert_eq!(snapshot.phase, PhaseKind::Pomodoro);
                assert_eq!(snapshot.state, EngineState::Running);
                assert_eq!(snapshot.elapsed_ms, 1_500);
            }
            other => panic!("expected Status, got {:?}", other),
        }
    }

    #[test]
    fn declined_response_keeps_reason() {
        let response = Response::Declined {
            reason: "cannot reconfigure while a pomodoro is in progress".to_string(),
        };

        let bytes = bincode::serialize(&response).unwrap();
        let decoded: Response = bincode::deserialize(&bytes).unwrap();

        assert_eq!(response, decoded);
    }

    #[cfg(unix)]
    #[test]
    fn socket_path_is_per_user() {
        let path = default_socket_path();

        assert!(path.starts_with("/run/user"));
        assert_eq!(path.file_name().unwrap(), "pomo.sock");
    }
}
