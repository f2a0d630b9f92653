use std::collections::{BTreeMap, HashMap};

use crate::core::{Tab, TabId, WindowId};
use crate::platform::TabSystem;
use tabcycle_ipc::{HostEvent, TabInfo};

/// The daemon's picture of the browser, kept current from bridge events.
#[derive(Debug, Default)]
pub struct TabMirror {
    tabs: HashMap<TabId, Tab>,
    /// Tab strip order per window
    windows: BTreeMap<WindowId, Vec<TabId>>,
    focused_window: Option<WindowId>,
}

impl TabMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused_window(&self) -> Option<WindowId> {
        self.focused_window
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn apply(&mut self, event: &HostEvent) {
        match event {
            HostEvent::Sync {
                windows,
                focused_window_id,
            } => {
                self.tabs.clear();
                self.windows.clear();
                for window in windows {
                    self.windows.entry(window.id).or_default();
                    for info in &window.tabs {
                        // Trust the enclosing window over the tab's own field
                        let mut tab = Tab::from_tab_info(info);
                        tab.window_id = window.id;
                        self.insert(tab);
                    }
                }
                self.focused_window = focused_window_id
                    .or(self.focused_window)
                    .filter(|id| self.windows.contains_key(id));
                tracing::info!(
                    "Mirror synced: {} windows, {} tabs, focused {:?}",
                    self.windows.len(),
                    self.tabs.len(),
                    self.focused_window
                );
            }
            HostEvent::TabCreated { tab } | HostEvent::TabUpdated { tab } => {
                self.upsert(tab);
            }
            HostEvent::TabActivated { tab_id, window_id } => {
                if !self.tabs.contains_key(tab_id) {
                    self.insert(Tab {
                        id: *tab_id,
                        window_id: *window_id,
                        active: true,
                        title: String::new(),
                        fav_icon_url: None,
                        url: None,
                    });
                }
                self.set_active(*window_id, *tab_id);
            }
            HostEvent::TabRemoved { tab_id, .. } => {
                self.remove_tab(*tab_id);
            }
            HostEvent::WindowCreated { window_id } => {
                self.windows.entry(*window_id).or_default();
            }
            HostEvent::WindowFocusChanged {
                window_id: Some(window_id),
            } => {
                self.windows.entry(*window_id).or_default();
                self.focused_window = Some(*window_id);
            }
            HostEvent::WindowFocusChanged { window_id: None } => {}
            HostEvent::WindowRemoved { window_id } => {
                if let Some(tab_ids) = self.windows.remove(window_id) {
                    for id in tab_ids {
                        self.tabs.remove(&id);
                    }
                }
                if self.focused_window == Some(*window_id) {
                    self.focused_window = None;
                }
            }
        }
    }

    fn upsert(&mut self, info: &TabInfo) {
        let tab = Tab::from_tab_info(info);
        match self.tabs.get_mut(&tab.id) {
            Some(existing) if existing.window_id == tab.window_id => {
                existing.title = tab.title;
                existing.fav_icon_url = tab.fav_icon_url;
                existing.url = tab.url;
                if tab.active {
                    self.set_active(tab.window_id, tab.id);
                }
            }
            Some(_) => {
                // Tab moved to another window
                self.remove_tab(tab.id);
                self.insert(tab);
            }
            None => self.insert(tab),
        }
    }

    fn insert(&mut self, tab: Tab) {
        let (id, window_id, active) = (tab.id, tab.window_id, tab.active);
        let order = self.windows.entry(window_id).or_default();
        if !order.contains(&id) {
            order.push(id);
        }
        self.tabs.insert(id, tab);
        if active {
            self.set_active(window_id, id);
        }
    }

    fn set_active(&mut self, window_id: WindowId, tab_id: TabId) {
        let Some(order) = self.windows.get(&window_id) else {
            return;
        };
        for id in order {
            if let Some(tab) = self.tabs.get_mut(id) {
                tab.active = *id == tab_id;
            }
        }
    }

    fn remove_tab(&mut self, tab_id: TabId) {
        let Some(tab) = self.tabs.remove(&tab_id) else {
            return;
        };
        if let Some(order) = self.windows.get_mut(&tab.window_id) {
            order.retain(|&id| id != tab_id);
        }
    }
}

impl TabSystem for TabMirror {
    fn tabs_in_window(&self, window_id: WindowId) -> Vec<Tab> {
        self.windows
            .get(&window_id)
            .map(|order| {
                order
                    .iter()
                    .filter_map(|id| self.tabs.get(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn focused_active_tab(&self) -> Option<Tab> {
        self.active_tab_in_window(self.focused_window?)
    }

    fn active_tab_in_window(&self, window_id: WindowId) -> Option<Tab> {
        self.windows
            .get(&window_id)?
            .iter()
            .filter_map(|id| self.tabs.get(id))
            .find(|t| t.active)
            .cloned()
    }

    fn get_tab(&self, tab_id: TabId) -> Option<Tab> {
        self.tabs.get(&tab_id).cloned()
    }

    fn windows(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }
}
