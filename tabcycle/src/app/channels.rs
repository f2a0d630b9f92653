use tokio::sync::mpsc;

use crate::ipc::RequestBroadcaster;
use tabcycle_ipc::{Command, Response};

pub type IpcCommandWithResponse = (Command, mpsc::Sender<Response>);

const COMMAND_QUEUE_CAPACITY: usize = 256;
const REQUEST_CAPACITY: usize = 256;

pub struct Channels {
    /// Cloned into every IPC connection
    pub cmd_tx: mpsc::Sender<IpcCommandWithResponse>,
    /// Drained by the single loop that owns all state
    pub cmd_rx: mpsc::Receiver<IpcCommandWithResponse>,
    pub broadcaster: RequestBroadcaster,
}

pub fn create_channels() -> Channels {
    let (cmd_tx, cmd_rx) = mpsc::channel::<IpcCommandWithResponse>(COMMAND_QUEUE_CAPACITY);
    Channels {
        cmd_tx,
        cmd_rx,
        broadcaster: RequestBroadcaster::new(REQUEST_CAPACITY),
    }
}
