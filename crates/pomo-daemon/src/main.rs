mod actors;
mod server;

use actors::{NotifierActor, SessionActor};
use anyhow::Result;
use pomo_core::{Config, SessionEngine};
use server::Server;
use tokio::sync::broadcast;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pomo_daemon=debug".parse()?))
        .init();

    info!("pomo daemon starting");

    let config = Config::load().unwrap_or_else(|error| {
        warn!(%error, "failed to load config, using defaults");
        Config::default()
    });

    let engine = config.build_engine().unwrap_or_else(|error| {
        warn!(%error, "invalid timer settings, using defaults");
        SessionEngine::default()
    });

    let (shutdown_sender, shutdown_receiver) = broadcast::channel::<()>(1);

    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("SIGINT received, initiating shutdown");
        shutdown_sender.send(()).ok();
    });

    let notifier_handle = if config.notifications.enabled {
        let (notifier_actor, notifier_handle) = NotifierActor::new(
            config.notifications.urgency,
            config.notifications.sound_enabled,
        );
        tokio::spawn(notifier_actor.run());
        Some(notifier_handle)
    } else {
        info!("desktop notifications disabled");
        None
    };

    let (session_actor, session_handle) = SessionActor::new(engine, notifier_handle);
    tokio::spawn(session_actor.run());

    let server = Server::new(session_handle);
    server.run(shutdown_receiver).await?;

    info!("pomo daemon stopped");
    Ok(())
}
