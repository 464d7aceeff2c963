use super::{countdown, run_command, Outcome};
use anyhow::Result;
use pomo_protocol::Request;

pub async fn execute() -> Result<()> {
    match run_command(Request::PauseResume).await? {
        Outcome::Applied(snapshot) if snapshot.paused => {
            println!("Pomodoro paused at {}", countdown(&snapshot));
            println!("   Interruptions: {}", snapshot.interruption_markers);
        }
        Outcome::Applied(snapshot) => {
            println!("Pomodoro resumed, {} left", countdown(&snapshot));
        }
        Outcome::Ignored(snapshot) if snapshot.side_activity_active => {
            println!("A side activity is running. Stop it first with `pomo side stop`.");
        }
        Outcome::Ignored(_) => {
            println!("Only a running pomodoro can be paused");
        }
    }

    Ok(())
}
