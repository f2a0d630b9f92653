use serde::{Deserialize, Serialize};

/// Tab as reported by the browser bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: u32,
    pub window_id: u32,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub fav_icon_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A browser window and its tabs, in tab strip order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    pub id: u32,
    #[serde(default)]
    pub tabs: Vec<TabInfo>,
}

/// Tab and window lifecycle notifications sent by the browser bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// Full picture of every open window, sent when the bridge connects
    Sync {
        windows: Vec<WindowInfo>,
        #[serde(default)]
        focused_window_id: Option<u32>,
    },

    // Tab events
    TabCreated {
        tab: TabInfo,
    },
    TabUpdated {
        tab: TabInfo,
    },
    TabActivated {
        tab_id: u32,
        window_id: u32,
    },
    TabRemoved {
        tab_id: u32,
        window_id: u32,
        #[serde(default)]
        is_window_closing: bool,
    },

    // Window events
    WindowCreated {
        window_id: u32,
    },
    /// `None` when focus left the browser entirely
    WindowFocusChanged {
        #[serde(default)]
        window_id: Option<u32>,
    },
    WindowRemoved {
        window_id: u32,
    },
}
