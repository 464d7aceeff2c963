use super::{phase_heading, run_command, Outcome};
use anyhow::Result;
use pomo_protocol::Request;

pub async fn execute() -> Result<()> {
    match run_command(Request::Stop).await? {
        Outcome::Applied(snapshot) => {
            println!("Phase finished. Next up: {}", phase_heading(&snapshot));
            println!(
                "   Pomodoros: {} ({} min)",
                snapshot.total_pomodoro_count, snapshot.total_pomodoro_minutes
            );
        }
        Outcome::Ignored(_) => {
            println!("No phase is running");
        }
    }

    Ok(())
}
