use super::send;
use anyhow::{bail, Result};
use clap::Args;
use pomo_core::{PhaseKind, SessionDurations};
use pomo_protocol::{EngineSnapshot, Request, Response};

#[derive(Debug, Clone, Default, Args)]
pub struct DurationArgs {
    /// Pomodoro length in minutes
    #[arg(long)]
    pub pomodoro: Option<u64>,
    /// Short break length in minutes
    #[arg(long)]
    pub short_break: Option<u64>,
    /// Long break length in minutes
    #[arg(long)]
    pub long_break: Option<u64>,
    /// Number of pomodoros before a long break
    #[arg(long)]
    pub long_break_after: Option<u32>,
}

impl DurationArgs {
    /// Builds the request, keeping the daemon's `current` value for every unset flag.
    fn into_request(self, current: &SessionDurations) -> Request {
        Request::Configure {
            pomodoro_minutes: self
                .pomodoro
                .unwrap_or(current.minutes_for(PhaseKind::Pomodoro)),
            short_break_minutes: self
                .short_break
                .unwrap_or(current.minutes_for(PhaseKind::ShortBreak)),
            long_break_minutes: self
                .long_break
                .unwrap_or(current.minutes_for(PhaseKind::LongBreak)),
            long_break_after: self
                .long_break_after
                .unwrap_or(current.long_break_after()),
        }
    }
}

async fn current_snapshot() -> Result<EngineSnapshot> {
    match send(Request::GetStatus).await? {
        Response::Status(snapshot) => Ok(snapshot),
        Response::Error { message } => bail!("{}", message),
        _ => bail!("unexpected response from daemon"),
    }
}

pub async fn execute(args: DurationArgs) -> Result<()> {
    let current = current_snapshot().await?;
    let request = args.into_request(&current.durations);

    match send(request).await? {
        Response::Applied(snapshot) => {
            println!("Durations updated");
            println!(
                "   Next up: {} {} ({})",
                snapshot.phase.symbol(),
                snapshot.phase.label(),
                snapshot.remaining_display
            );
            println!(
                "   Long break after {} more pomodoro(s)",
                snapshot.pomodoros_until_long_break
            );
        }
        Response::Declined { reason } => {
            println!("Configuration declined: {}", reason);
        }
        Response::Error { message } => bail!("{}", message),
        _ => bail!("unexpected response from daemon"),
    }

    Ok(())
}
