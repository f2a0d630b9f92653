mod client;
mod request_server;
mod server;

use anyhow::Result;
use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

pub use client::{subscribe_and_print, IpcClient};
pub use request_server::{RequestBroadcaster, RequestServer};
pub use server::IpcServer;

pub const SOCKET_PATH: &str = "/tmp/tabcycle.sock";
pub const REQUEST_SOCKET_PATH: &str = "/tmp/tabcycle-requests.sock";

/// Write one JSON document as a line.
async fn write_json_line<W, T>(writer: &mut W, value: &T) -> Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut json = serde_json::to_vec(value)?;
    json.push(b'\n');
    writer.write_all(&json).await?;
    writer.flush().await?;
    Ok(())
}

/// Peer went away mid-write; not worth more than a trace.
fn is_disconnect(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>().is_some_and(|io| {
        matches!(
            io.kind(),
            std::io::ErrorKind::BrokenPipe | std::io::ErrorKind::ConnectionReset
        )
    })
}
