use std::path::PathBuf;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;

use tabcycle_ipc::{Command, Response};

use super::{is_disconnect, write_json_line, SOCKET_PATH};
use crate::error::Error;

/// Commands paired with the channel their response goes back on.
type CommandSender = mpsc::Sender<(Command, mpsc::Sender<Response>)>;

pub struct IpcServer {
    socket_path: PathBuf,
    cmd_tx: CommandSender,
}

impl IpcServer {
    pub fn new(cmd_tx: CommandSender) -> Self {
        Self::with_path(SOCKET_PATH, cmd_tx)
    }

    pub fn with_path(socket_path: impl Into<PathBuf>, cmd_tx: CommandSender) -> Self {
        Self {
            socket_path: socket_path.into(),
            cmd_tx,
        }
    }

    pub fn bind(&self) -> Result<UnixListener> {
        // Remove a socket left behind by a previous daemon
        if self.socket_path.exists() {
            std::fs::remove_file(&self.socket_path)?;
        }

        let listener = UnixListener::bind(&self.socket_path)?;
        tracing::info!("IPC server listening on {:?}", self.socket_path);
        Ok(listener)
    }

    pub async fn serve(&self, listener: UnixListener) -> Result<()> {
        loop {
            let (stream, _addr) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    tracing::error!("IPC accept error: {}", e);
                    continue;
                }
            };

            let cmd_tx = self.cmd_tx.clone();
            tokio::spawn(async move {
                match Self::handle_connection(stream, cmd_tx).await {
                    Ok(()) => {}
                    Err(e) if is_disconnect(&e) => {
                        tracing::debug!("CLI client left before its response");
                    }
                    Err(e) => tracing::warn!("IPC connection failed: {}", e),
                }
            });
        }
    }

    /// One response line per command line, until the client closes its side.
    async fn handle_connection(stream: UnixStream, cmd_tx: CommandSender) -> Result<()> {
        let (reader, mut writer) = stream.into_split();
        let mut lines = BufReader::new(reader).lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let response = respond(line, &cmd_tx).await;
            write_json_line(&mut writer, &response).await?;
        }

        Ok(())
    }
}

/// Hands a command to the state loop and waits for its answer.
async fn respond(line: &str, cmd_tx: &CommandSender) -> Response {
    let cmd = match serde_json::from_str::<Command>(line) {
        Ok(cmd) => cmd,
        Err(e) => return Error::InvalidCommand(e).into(),
    };
    tracing::debug!("Received command: {:?}", cmd);

    let (resp_tx, mut resp_rx) = mpsc::channel(1);
    if cmd_tx.send((cmd, resp_tx)).await.is_err() {
        return Error::DaemonStopped.into();
    }
    resp_rx
        .recv()
        .await
        .unwrap_or_else(|| Error::DaemonStopped.into())
}

impl Drop for IpcServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn test_command_round_trip_over_socket() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cmd.sock");
        let (cmd_tx, mut cmd_rx) = mpsc::channel(8);
        let server = IpcServer::with_path(&path, cmd_tx);
        let listener = server.bind().unwrap();
        tokio::spawn(async move { server.serve(listener).await });

        // Answer every command with its state
        tokio::spawn(async move {
            while let Some((cmd, resp_tx)) = cmd_rx.recv().await {
                let response = match cmd {
                    Command::GetState => Response::State {
                        state: Default::default(),
                    },
                    _ => Response::Ok,
                };
                let _ = resp_tx.send(response).await;
            }
        });

        let mut stream = UnixStream::connect(&path).await.unwrap();

        stream
            .write_all(b"{\"type\":\"cycle_forward\"}\n\nnot json\n")
            .await
            .unwrap();
        stream.shutdown().await.unwrap();

        let mut output = String::new();
        stream.read_to_string(&mut output).await.unwrap();
        let lines: Vec<Response> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert!(matches!(lines[0], Response::Ok));
        assert!(matches!(
            &lines[1],
            Response::Error { message } if message.starts_with("invalid command")
        ));
    }

    #[tokio::test]
    async fn test_respond_after_state_loop_stopped() {
        let (cmd_tx, cmd_rx) = mpsc::channel(1);
        drop(cmd_rx);

        let response = respond("{\"type\":\"commit\"}", &cmd_tx).await;
        assert!(matches!(
            response,
            Response::Error { message } if message == "daemon is shutting down"
        ));
    }

    #[tokio::test]
    async fn test_respond_when_command_goes_unanswered() {
        let (cmd_tx, mut cmd_rx) = mpsc::channel(1);
        // Drop the response sender without answering
        tokio::spawn(async move { while cmd_rx.recv().await.is_some() {} });

        let response = respond("{\"type\":\"cancel\"}", &cmd_tx).await;
        assert!(matches!(response, Response::Error { .. }));
    }
}
