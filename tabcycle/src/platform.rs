use crate::core::{Tab, TabId, WindowId};
use crate::error::Result;
use tabcycle_ipc::TabDescriptor;

/// Trait for querying tabs and windows from the browser.
/// This abstraction allows mocking in tests.
pub trait TabSystem {
    /// Live tabs of a window, in tab strip order.
    fn tabs_in_window(&self, window_id: WindowId) -> Vec<Tab>;
    /// Active tab of the window the user last focused.
    fn focused_active_tab(&self) -> Option<Tab>;
    fn active_tab_in_window(&self, window_id: WindowId) -> Option<Tab>;
    fn get_tab(&self, tab_id: TabId) -> Option<Tab>;
    fn windows(&self) -> Vec<WindowId>;
}

/// Trait for acting on the browser and the overlay (side effects).
/// This abstraction allows mocking in tests.
pub trait TabManipulator {
    /// Returns false if the overlay cannot be displayed in this tab.
    fn show_overlay(&self, tab: &Tab) -> bool;
    fn hide_overlay(&self, tab_id: TabId) -> Result<()>;
    fn render_overlay(
        &self,
        tab_id: TabId,
        tabs: &[TabDescriptor],
        highlight_index: usize,
    ) -> Result<()>;
    fn activate_tab(&self, tab_id: TabId) -> Result<()>;
}
