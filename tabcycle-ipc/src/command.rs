use serde::{Deserialize, Serialize};

use crate::HostEvent;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // Cycling (keyboard shortcut and overlay input)
    CycleForward,
    CycleReverse,
    ActivateTab { tab_id: u32 },
    Cancel,
    Commit,

    // Browser lifecycle notifications
    HostEvent { event: HostEvent },

    // Queries
    GetState,
    ListMru {
        #[serde(default)]
        window_id: Option<u32>,
    },

    // Control
    Quit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Ok,
    Error { message: String },
    State { state: SessionInfo },
    Mru { windows: Vec<MruInfo> },
}

/// Display projection of a tab, as shown in the overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabDescriptor {
    pub id: u32,
    pub title: String,
    pub fav_icon_url: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionInfo {
    pub active: bool,
    pub window_id: Option<u32>,
    pub anchor_tab_id: Option<u32>,
    pub highlight_index: usize,
    pub snapshot: Vec<TabDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MruInfo {
    pub window_id: u32,
    pub tabs: Vec<u32>,
}
