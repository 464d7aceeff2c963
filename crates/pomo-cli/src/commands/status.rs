use super::{countdown, is_overtime, phase_heading};
use crate::client::{ClientError, DaemonClient};
use anyhow::Result;
use pomo_protocol::{EngineSnapshot, Request, Response};
use serde::Serialize;

#[derive(Serialize)]
struct StatusOutput<'a> {
    phase: &'a str,
    state: &'a str,
    active: bool,
    title: String,
    color: &'a str,
    remaining_formatted: String,
    remaining_seconds: u64,
    elapsed_seconds: u64,
    overtime: bool,
    paused: bool,
    pomodoros: u32,
    pomodoro_minutes: u64,
    non_pomodoro_minutes: u64,
    non_pomodoro_seconds: u64,
    pomodoros_until_long_break: u32,
    interruptions: usize,
    task_minutes: u64,
    side_activity_active: bool,
    side_activity_minutes: u64,
}

impl<'a> StatusOutput<'a> {
    fn from_snapshot(snapshot: &'a EngineSnapshot) -> Self {
        Self {
            phase: snapshot.phase.as_str(),
            state: snapshot.state.as_str(),
            active: snapshot.is_active(),
            title: snapshot.title(),
            color: snapshot.phase.color(),
            remaining_formatted: countdown(snapshot),
            remaining_seconds: snapshot.time_limit_ms.saturating_sub(snapshot.elapsed_ms) / 1_000,
            elapsed_seconds: snapshot.elapsed_ms / 1_000,
            overtime: is_overtime(snapshot),
            paused: snapshot.paused,
            pomodoros: snapshot.total_pomodoro_count,
            pomodoro_minutes: snapshot.total_pomodoro_minutes,
            non_pomodoro_minutes: snapshot.total_non_pomodoro_minutes,
            non_pomodoro_seconds: snapshot.non_pomodoro_elapsed_ms / 1_000,
            pomodoros_until_long_break: snapshot.pomodoros_until_long_break,
            interruptions: snapshot.interruption_count,
            task_minutes: snapshot.task_minutes,
            side_activity_active: snapshot.side_activity_active,
            side_activity_minutes: snapshot.side_activity_minutes,
        }
    }
}

pub async fn execute(json: bool) -> Result<()> {
    let client = DaemonClient::new();

    match client.send(Request::GetStatus).await {
        Ok(Response::Status(snapshot)) => {
            if json {
                let output = StatusOutput::from_snapshot(&snapshot);
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print!("{}", render_status(&snapshot));
            }
        }
        Ok(Response::Error { message }) => {
            if json {
                println!("{}", serde_json::json!({ "error": message }));
            } else {
                eprintln!("Error: {}", message);
            }
            std::process::exit(1);
        }
        Ok(_) => {
            if json {
                println!(r#"{{"error": "unexpected response"}}"#);
            } else {
                eprintln!("Error: unexpected response from daemon");
            }
            std::process::exit(1);
        }
        Err(ClientError::DaemonNotRunning) => {
            if json {
                println!(r#"{{"error": "daemon not running", "active": false}}"#);
            } else {
                println!("Daemon not running");
            }
        }
        Err(error) => {
            if json {
                println!("{}", serde_json::json!({ "error": error.to_string() }));
            } else {
                eprintln!("Error: {}", error);
            }
            std::process::exit(1);
        }
    }

    Ok(())
}

fn render_status(snapshot: &EngineSnapshot) -> String {
    let mut lines = Vec::new();

    let remaining = if is_overtime(snapshot) {
        "time's up".to_string()
    } else {
        countdown(snapshot)
    };
    lines.push(format!(
        "{}  {}  ({})",
        phase_heading(snapshot),
        remaining,
        snapshot.state.as_str()
    ));

    if snapshot.interruption_count > 0 {
        lines.push(format!(
            "   Interruptions: {}",
            snapshot.interruption_markers.trim_end()
        ));
    }

    lines.push(format!(
        "   Pomodoros: {} ({} min), {} until long break",
        snapshot.total_pomodoro_count,
        snapshot.total_pomodoro_minutes,
        snapshot.pomodoros_until_long_break
    ));
    lines.push(format!(
        "   Non-pomodoro time: {} min",
        snapshot.total_non_pomodoro_minutes
    ));

    if snapshot.side_activity_active {
        lines.push(format!(
            "   Side activity: {} min (running)",
            snapshot.side_activity_minutes
        ));
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}
