use super::{run_command, Outcome};
use anyhow::Result;
use clap::ValueEnum;
use pomo_protocol::Request;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SideAction {
    Start,
    Stop,
}

impl SideAction {
    fn request(self) -> Request {
        match self {
            SideAction::Start => Request::StartSideActivity,
            SideAction::Stop => Request::StopSideActivity,
        }
    }
}

pub async fn execute(action: SideAction) -> Result<()> {
    match (action, run_command(action.request()).await?) {
        (SideAction::Start, Outcome::Applied(_)) => {
            println!("Side activity started");
        }
        (SideAction::Start, Outcome::Ignored(snapshot)) if snapshot.side_activity_active => {
            println!("A side activity is already running");
        }
        (SideAction::Start, Outcome::Ignored(snapshot)) => {
            println!(
                "Cannot start a side activity while the {} is {}",
                snapshot.phase.label().to_lowercase(),
                snapshot.state.as_str()
            );
        }
        (SideAction::Stop, Outcome::Applied(snapshot)) => {
            println!("Side activity stopped");
            println!(
                "   Non-pomodoro time: {} min",
                snapshot.total_non_pomodoro_minutes
            );
        }
        (SideAction::Stop, Outcome::Ignored(_)) => {
            println!("No side activity is running");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_map_to_requests() {
        assert_eq!(SideAction::Start.request(), Request::StartSideActivity);
        assert_eq!(SideAction::Stop.request(), Request::StopSideActivity);
    }
}
