use serde::{Deserialize, Serialize};

use crate::TabDescriptor;

/// Requests from the daemon to the browser bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostRequest {
    // Overlay requests
    ShowOverlay {
        tab_id: u32,
    },
    HideOverlay {
        tab_id: u32,
    },
    RenderOverlay {
        tab_id: u32,
        tabs: Vec<TabDescriptor>,
        highlight_index: usize,
    },

    // Tab requests
    ActivateTab {
        tab_id: u32,
    },
}

/// Filter for subscribing to specific request kinds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestFilter {
    /// Subscribe to overlay requests (show, hide, render)
    #[serde(default)]
    pub overlay: bool,
    /// Subscribe to tab activation requests
    #[serde(default)]
    pub activation: bool,
}

impl RequestFilter {
    /// Create a filter that subscribes to all requests
    pub fn all() -> Self {
        Self {
            overlay: true,
            activation: true,
        }
    }

    /// Check if the filter matches a given request
    pub fn matches(&self, request: &HostRequest) -> bool {
        match request {
            HostRequest::ShowOverlay { .. }
            | HostRequest::HideOverlay { .. }
            | HostRequest::RenderOverlay { .. } => self.overlay,
            HostRequest::ActivateTab { .. } => self.activation,
        }
    }

    /// Check if any filter is set
    pub fn any(&self) -> bool {
        self.overlay || self.activation
    }
}

/// First line a subscriber sends on the request socket
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscribeRequest {
    /// Request filter (if not set or all false, subscribes to everything)
    #[serde(default)]
    pub filter: RequestFilter,
}

impl SubscribeRequest {
    /// Get the effective filter (all if none specified)
    pub fn effective_filter(&self) -> RequestFilter {
        if self.filter.any() {
            self.filter.clone()
        } else {
            RequestFilter::all()
        }
    }
}
