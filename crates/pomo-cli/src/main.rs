mod client;
mod commands;
mod daemon_launcher;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{DurationArgs, SideAction};

#[derive(Parser)]
#[command(name = "pomo")]
#[command(about = "pomo - control the Pomodoro daemon", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the current phase
    Start,
    /// Finish the current phase and move to the next one
    Stop,
    /// Bypass the current phase without running it
    Skip,
    /// Pause or resume the running pomodoro
    #[command(visible_alias = "resume")]
    Pause,
    /// Track time spent outside pomodoros
    Side {
        #[arg(value_enum)]
        action: SideAction,
    },
    /// Show the session status
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change phase durations and the long break cadence
    Configure(DurationArgs),
    /// Create the configuration file interactively
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start => commands::start().await,
        Commands::Stop => commands::stop().await,
        Commands::Skip => commands::skip().await,
        Commands::Pause => commands::pause().await,
        Commands::Side { action } => commands::side(action).await,
        Commands::Status { json } => commands::status(json).await,
        Commands::Configure(args) => commands::configure(args).await,
        Commands::Init { force } => commands::init(force),
    }
}
