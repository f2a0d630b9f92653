mod channels;
mod command;
mod dispatch;
mod effects;

use std::cell::RefCell;

use anyhow::{Context, Result};

use crate::browser::{BridgeManipulator, TabMirror};
use crate::core::{Config, MruStore, State};
use crate::ipc::{IpcServer, RequestServer};
use crate::store::{JsonFileStore, MruPersistence};
use tabcycle_ipc::Command;

use channels::{create_channels, Channels};
use dispatch::dispatch_command;

pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(self) -> Result<()> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build tokio runtime")?;
        rt.block_on(self.run_async())
    }

    async fn run_async(self) -> Result<()> {
        let Channels {
            cmd_tx,
            mut cmd_rx,
            broadcaster,
        } = create_channels();

        let persistence = JsonFileStore::new(&self.config.store_path);
        let mru = match persistence.load() {
            Ok(mru) => mru,
            Err(e) => {
                tracing::warn!(
                    "Failed to load MRU store from {:?}, starting empty: {}",
                    persistence.path(),
                    e
                );
                MruStore::new()
            }
        };

        let manipulator = BridgeManipulator::new(
            broadcaster.clone(),
            self.config.restricted_url_prefixes.clone(),
        );
        let state = RefCell::new(State::new(self.config, mru));
        let mut mirror = TabMirror::new();

        // Start IPC server
        let ipc_server = IpcServer::new(cmd_tx);
        let ipc_listener = ipc_server
            .bind()
            .context("Failed to bind command socket")?;
        tokio::spawn(async move {
            if let Err(e) = ipc_server.serve(ipc_listener).await {
                tracing::error!("IPC server error: {}", e);
            }
        });

        // Start request server
        let request_server = RequestServer::new(broadcaster);
        let request_listener = request_server
            .bind()
            .context("Failed to bind request socket")?;
        tokio::spawn(async move {
            if let Err(e) = request_server.serve(request_listener).await {
                tracing::error!("Request server error: {}", e);
            }
        });

        tracing::info!("tabcycle started, waiting for the browser bridge");

        loop {
            tokio::select! {
                Some((cmd, resp_tx)) = cmd_rx.recv() => {
                    // The mirror must see the event before the handlers query it
                    if let Command::HostEvent { event } = &cmd {
                        mirror.apply(event);
                    }

                    let response = dispatch_command(&cmd, &state, &mirror, &manipulator, &persistence);
                    let _ = resp_tx.send(response).await;

                    if matches!(cmd, Command::Quit) {
                        tracing::info!("Quit requested");
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted, shutting down");
                    break;
                }
                else => break,
            }
        }

        tracing::info!(
            "tabcycle exiting ({} tabs mirrored, focused window {:?})",
            mirror.tab_count(),
            mirror.focused_window()
        );
        Ok(())
    }
}
