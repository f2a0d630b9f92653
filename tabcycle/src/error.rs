use crate::core::TabId;
use tabcycle_ipc::Response;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage data is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("overlay unavailable in tab {tab_id}: {reason}")]
    DisplayUnavailable { tab_id: TabId, reason: String },

    #[error("tab {0} no longer exists")]
    StaleTab(TabId),

    #[error("no browser bridge connected")]
    BridgeDisconnected,

    #[error("invalid command: {0}")]
    InvalidCommand(#[source] serde_json::Error),

    #[error("daemon is shutting down")]
    DaemonStopped,
}

impl From<Error> for Response {
    fn from(e: Error) -> Self {
        Response::Error {
            message: e.to_string(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
