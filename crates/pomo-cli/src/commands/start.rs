use super::{countdown, phase_heading, run_command, Outcome};
use anyhow::Result;
use pomo_protocol::Request;

pub async fn execute() -> Result<()> {
    match run_command(Request::Start).await? {
        Outcome::Applied(snapshot) => {
            println!("{} started", phase_heading(&snapshot));
            println!("   Remaining: {}", countdown(&snapshot));
        }
        Outcome::Ignored(snapshot) if snapshot.side_activity_active => {
            println!("A side activity is running. Stop it first with `pomo side stop`.");
        }
        Outcome::Ignored(snapshot) => {
            println!(
                "{} is already {}",
                phase_heading(&snapshot),
                snapshot.state.as_str()
            );
        }
    }

    Ok(())
}
