use crate::actors::SessionHandle;
use anyhow::{bail, Context, Result};
use interprocess::local_socket::{
    tokio::{prelude::*, Stream},
    GenericFilePath, ListenerOptions,
};
use pomo_core::SessionDurations;
use pomo_protocol::{Request, Response};
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, error, info, instrument};

const MAX_REQUEST_BYTES: usize = 64 * 1024;

pub struct Server {
    socket_path: PathBuf,
    session_handle: SessionHandle,
}

impl Server {
    pub fn new(session_handle: SessionHandle) -> Self {
        Self {
            socket_path: pomo_protocol::default_socket_path(),
            session_handle,
        }
    }

    fn cleanup_stale_socket(&self) -> Result<()> {
        if self.socket_path.exists() {
            std::fs::remove_file(&self.socket_path)
                .context("failed to remove stale socket")?;
            debug!("removed stale socket file");
        }
        Ok(())
    }

    #[instrument(skip(self, shutdown))]
    pub async fn run(&self, mut shutdown: tokio::sync::broadcast::Receiver<()>) -> Result<()> {
        self.cleanup_stale_socket()?;

        let listener = ListenerOptions::new()
            .name(self.socket_path.as_os_str().to_fs_name::<GenericFilePath>()?)
            .create_tokio()?;

        info!(path = %self.socket_path.display(), "server listening");

        loop {
            tokio::select! {
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok(stream) => {
                            let session_handle = self.session_handle.clone();
                            tokio::spawn(async move {
                                if let Err(error) = handle_connection(stream, session_handle).await {
                                    error!(%error, "connection handler failed");
                                }
                            });
                        }
                        Err(error) => {
                            error!(%error, "failed to accept connection");
                        }
                    }
                }
                _ = shutdown.recv() => {
                    info!("shutdown signal received");
                    break;
                }
            }
        }

        self.cleanup_socket();
        Ok(())
    }

    fn cleanup_socket(&self) {
        if let Err(error) = std::fs::remove_file(&self.socket_path) {
            debug!(%error, "socket file already removed");
        } else {
            debug!("socket file cleaned up");
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.cleanup_socket();
    }
}

async fn handle_connection(mut stream: Stream, session_handle: SessionHandle) -> Result<()> {
    debug!("new connection accepted");

    let mut length_buffer = [0u8; 4];
    stream.read_exact(&mut length_buffer).await?;
    let length = u32::from_le_bytes(length_buffer) as usize;
    if length > MAX_REQUEST_BYTES {
        bail!("request of {} bytes exceeds limit", length);
    }

    let mut payload = vec![0u8; length];
    stream.read_exact(&mut payload).await?;

    let request: Request =
        bincode::deserialize(&payload).context("failed to deserialize request")?;

    debug!(?request, "received request");

    let response = handle_request(request, &session_handle).await;

    debug!(?response, "sending response");

    let response_bytes = bincode::serialize(&response)?;
    let response_length = (response_bytes.len() as u32).to_le_bytes();

    stream.write_all(&response_length).await?;
    stream.write_all(&response_bytes).await?;
    stream.flush().await?;

    Ok(())
}

fn session_unavailable() -> Response {
    Response::Error {
        message: "session engine is not running".to_string(),
    }
}

async fn handle_request(request: Request, session_handle: &SessionHandle) -> Response {
    match request {
        Request::Ping => Response::Pong,

        Request::GetStatus => match session_handle.get_status().await {
            Some(snapshot) => Response::Status(snapshot),
            None => session_unavailable(),
        },

        Request::Configure {
            pomodoro_minutes,
            short_break_minutes,
            long_break_minutes,
            long_break_after,
        } => {
            let durations = match SessionDurations::new(
                pomodoro_minutes,
                short_break_minutes,
                long_break_minutes,
                long_break_after,
            ) {
                Ok(durations) => durations,
                Err(error) => {
                    return Response::Declined {
                        reason: error.to_string(),
                    }
                }
            };

            match session_handle.configure(durations).await {
                Some(Ok(snapshot)) => Response::Applied(snapshot),
                Some(Err(error)) => Response::Declined {
                    reason: error.to_string(),
                },
                None => session_unavailable(),
            }
        }

        other => {
            let Some(command) = other.command() else {
                return Response::Error {
                    message: format!("unsupported request: {:?}", other),
                };
            };

            match session_handle.execute(command).await {
                Some(reply) if reply.applied => Response::Applied(reply.snapshot),
                Some(reply) => Response::Ignored(reply.snapshot),
                None => session_unavailable(),
            }
        }
    }
}
