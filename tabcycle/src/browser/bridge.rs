use crate::core::{Tab, TabId};
use crate::error::{Error, Result};
use crate::ipc::RequestBroadcaster;
use crate::platform::TabManipulator;
use tabcycle_ipc::{HostRequest, TabDescriptor};

/// Drives the browser by broadcasting requests to connected bridges.
pub struct BridgeManipulator {
    broadcaster: RequestBroadcaster,
    restricted_url_prefixes: Vec<String>,
}

impl BridgeManipulator {
    pub fn new(broadcaster: RequestBroadcaster, restricted_url_prefixes: Vec<String>) -> Self {
        Self {
            broadcaster,
            restricted_url_prefixes,
        }
    }

    fn check_overlay(&self, tab: &Tab) -> Result<()> {
        let url = tab.url_str();
        if let Some(prefix) = self
            .restricted_url_prefixes
            .iter()
            .find(|p| url.starts_with(p.as_str()))
        {
            return Err(Error::DisplayUnavailable {
                tab_id: tab.id,
                reason: format!("restricted page ({})", prefix),
            });
        }
        if self.broadcaster.overlay_subscribers() == 0 {
            return Err(Error::DisplayUnavailable {
                tab_id: tab.id,
                reason: "no bridge connected".to_string(),
            });
        }
        Ok(())
    }

    fn send(&self, request: HostRequest) -> Result<()> {
        tracing::debug!("Sending request: {:?}", request);
        match self.broadcaster.send(request) {
            0 => Err(Error::BridgeDisconnected),
            _ => Ok(()),
        }
    }
}

impl TabManipulator for BridgeManipulator {
    fn show_overlay(&self, tab: &Tab) -> bool {
        if let Err(e) = self.check_overlay(tab) {
            tracing::info!("Cannot show overlay in tab {}: {}", tab.id, e);
            return false;
        }
        self.send(HostRequest::ShowOverlay { tab_id: tab.id }).is_ok()
    }

    fn hide_overlay(&self, tab_id: TabId) -> Result<()> {
        self.send(HostRequest::HideOverlay { tab_id })
    }

    fn render_overlay(
        &self,
        tab_id: TabId,
        tabs: &[TabDescriptor],
        highlight_index: usize,
    ) -> Result<()> {
        self.send(HostRequest::RenderOverlay {
            tab_id,
            tabs: tabs.to_vec(),
            highlight_index,
        })
    }

    fn activate_tab(&self, tab_id: TabId) -> Result<()> {
        self.send(HostRequest::ActivateTab { tab_id })
    }
}
