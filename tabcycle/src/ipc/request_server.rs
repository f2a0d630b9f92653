use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::broadcast;

use tabcycle_ipc::{HostRequest, RequestFilter, SubscribeRequest};

use super::{is_disconnect, write_json_line, REQUEST_SOCKET_PATH};

/// Streams daemon requests to the browser bridge and any other subscribers.
pub struct RequestServer {
    socket_path: PathBuf,
    broadcaster: RequestBroadcaster,
}

impl RequestServer {
    pub fn new(broadcaster: RequestBroadcaster) -> Self {
        Self::with_path(REQUEST_SOCKET_PATH, broadcaster)
    }

    pub fn with_path(socket_path: impl Into<PathBuf>, broadcaster: RequestBroadcaster) -> Self {
        Self {
            socket_path: socket_path.into(),
            broadcaster,
        }
    }

    pub fn bind(&self) -> Result<UnixListener> {
        if self.socket_path.exists() {
            std::fs::remove_file(&self.socket_path)?;
        }

        let listener = UnixListener::bind(&self.socket_path)?;
        tracing::info!("Request server listening on {:?}", self.socket_path);
        Ok(listener)
    }

    pub async fn serve(self, listener: UnixListener) -> Result<()> {
        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let broadcaster = self.broadcaster.clone();
                    tokio::spawn(async move {
                        match Self::handle_connection(stream, broadcaster).await {
                            Err(e) if !is_disconnect(&e) => {
                                tracing::debug!("Request subscriber failed: {}", e);
                            }
                            _ => tracing::debug!("Request subscriber disconnected"),
                        }
                    });
                }
                Err(e) => {
                    tracing::error!("Request server accept error: {}", e);
                }
            }
        }
    }

    async fn handle_connection(stream: UnixStream, broadcaster: RequestBroadcaster) -> Result<()> {
        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);
        let mut line = String::new();

        // Requests sent during the handshake are buffered, not lost
        let mut request_rx = broadcaster.subscribe();

        if reader.read_line(&mut line).await? == 0 {
            return Ok(());
        }
        let request: SubscribeRequest = serde_json::from_str(line.trim()).unwrap_or_default();
        let filter = request.effective_filter();

        // Counted only while this connection lives
        let _registration = broadcaster.register(&filter);
        tracing::debug!("New request subscriber with filter: {:?}", filter);

        loop {
            line.clear();
            tokio::select! {
                received = request_rx.recv() => match received {
                    Ok(request) => {
                        if filter.matches(&request) {
                            write_json_line(&mut writer, &request).await?;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("Request subscriber lagged by {} messages", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                // Subscribers never write after the handshake; EOF means they left
                read = reader.read_line(&mut line) => {
                    if read? == 0 {
                        break;
                    }
                }
            }
        }

        Ok(())
    }
}

impl Drop for RequestServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

#[derive(Default)]
struct SubscriberCounts {
    overlay: AtomicUsize,
    activation: AtomicUsize,
}

impl SubscriberCounts {
    fn counter(&self, request: &HostRequest) -> &AtomicUsize {
        match request {
            HostRequest::ShowOverlay { .. }
            | HostRequest::HideOverlay { .. }
            | HostRequest::RenderOverlay { .. } => &self.overlay,
            HostRequest::ActivateTab { .. } => &self.activation,
        }
    }
}

/// Keeps a connected subscriber counted until dropped.
pub struct Registration {
    counts: Arc<SubscriberCounts>,
    filter: RequestFilter,
}

impl Drop for Registration {
    fn drop(&mut self) {
        if self.filter.overlay {
            self.counts.overlay.fetch_sub(1, Ordering::SeqCst);
        }
        if self.filter.activation {
            self.counts.activation.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

/// Sender side of the request channel, plus how many connected subscribers
/// want each kind of request.
#[derive(Clone)]
pub struct RequestBroadcaster {
    request_tx: broadcast::Sender<HostRequest>,
    counts: Arc<SubscriberCounts>,
}

impl RequestBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (request_tx, _) = broadcast::channel(capacity);
        Self {
            request_tx,
            counts: Arc::default(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HostRequest> {
        self.request_tx.subscribe()
    }

    /// Count a subscriber that completed its handshake with `filter`.
    pub fn register(&self, filter: &RequestFilter) -> Registration {
        if filter.overlay {
            self.counts.overlay.fetch_add(1, Ordering::SeqCst);
        }
        if filter.activation {
            self.counts.activation.fetch_add(1, Ordering::SeqCst);
        }
        Registration {
            counts: Arc::clone(&self.counts),
            filter: filter.clone(),
        }
    }

    /// Connected subscribers that would receive `request`.
    pub fn interested(&self, request: &HostRequest) -> usize {
        self.counts.counter(request).load(Ordering::SeqCst)
    }

    pub fn overlay_subscribers(&self) -> usize {
        self.counts.overlay.load(Ordering::SeqCst)
    }

    /// Send a request to all subscribers. Returns how many connected
    /// subscribers want it.
    pub fn send(&self, request: HostRequest) -> usize {
        let interested = self.interested(&request);
        let _ = self.request_tx.send(request);
        interested
    }
}
