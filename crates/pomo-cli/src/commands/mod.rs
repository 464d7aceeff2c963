mod configure;
mod init;
mod pause;
mod side;
mod skip;
mod start;
mod status;
mod stop;

pub use configure::{execute as configure, DurationArgs};
pub use init::execute as init;
pub use pause::execute as pause;
pub use side::{execute as side, SideAction};
pub use skip::execute as skip;
pub use start::execute as start;
pub use status::execute as status;
pub use stop::execute as stop;

use crate::client::{ClientError, DaemonClient};
use crate::daemon_launcher::ensure_daemon_running;
use anyhow::{bail, Result};
use pomo_core::{format_countdown, EngineSnapshot};
use pomo_protocol::{Request, Response};

/// Sends `request`, launching the daemon first when nothing listens on its socket.
async fn send(request: Request) -> Result<Response> {
    let client = DaemonClient::new();

    match client.send(request.clone()).await {
        Err(ClientError::DaemonNotRunning) => {
            ensure_daemon_running().await?;
            Ok(client.send(request).await?)
        }
        Err(ClientError::Timeout) => bail!("connection to the daemon timed out"),
        result => Ok(result?),
    }
}

/// Outcome of an engine command as reported by the daemon.
enum Outcome {
    Applied(EngineSnapshot),
    Ignored(EngineSnapshot),
}

async fn run_command(request: Request) -> Result<Outcome> {
    match send(request).await? {
        Response::Applied(snapshot) => Ok(Outcome::Applied(snapshot)),
        Response::Ignored(snapshot) => Ok(Outcome::Ignored(snapshot)),
        Response::Error { message } => bail!("{}", message),
        _ => bail!("unexpected response from daemon"),
    }
}

fn phase_heading(snapshot: &EngineSnapshot) -> String {
    format!("{} {}", snapshot.phase.symbol(), snapshot.phase.label())
}

/// Countdown computed from the raw counters, unaffected by the overtime blink.
fn countdown(snapshot: &EngineSnapshot) -> String {
    format_countdown(snapshot.time_limit_ms.saturating_sub(snapshot.elapsed_ms))
}

fn is_overtime(snapshot: &EngineSnapshot) -> bool {
    snapshot.elapsed_ms >= snapshot.time_limit_ms
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomo_core::SessionEngine;

    #[test]
    fn countdown_ignores_blink() {
        let mut engine = SessionEngine::default();
        engine.start();
        for _ in 0..3_601 {
            engine.on_tick();
        }
        let snapshot = engine.snapshot();

        assert!(is_overtime(&snapshot));
        assert_eq!(countdown(&snapshot), "00:00");
    }

    #[test]
    fn phase_heading_uses_symbol_and_label() {
        let snapshot = SessionEngine::default().snapshot();

        assert_eq!(phase_heading(&snapshot), "\u{2b22} Pomodoro");
    }
}
