use super::{phase_heading, run_command, Outcome};
use anyhow::Result;
use pomo_protocol::Request;

pub async fn execute() -> Result<()> {
    match run_command(Request::Skip).await? {
        Outcome::Applied(snapshot) => {
            println!("Skipped. Next up: {}", phase_heading(&snapshot));
        }
        Outcome::Ignored(snapshot) if snapshot.side_activity_active => {
            println!("A side activity is running. Stop it first with `pomo side stop`.");
        }
        Outcome::Ignored(snapshot) => {
            println!(
                "Cannot skip while {} is {}",
                phase_heading(&snapshot),
                snapshot.state.as_str()
            );
        }
    }

    Ok(())
}
