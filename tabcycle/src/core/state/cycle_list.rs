use std::collections::{HashMap, HashSet};

use super::super::{Tab, TabId, WindowId};
use super::State;
use crate::platform::TabSystem;
use tabcycle_ipc::TabDescriptor;

/// Candidates for a cycling session, most recent first.
#[derive(Debug, Default)]
pub struct CycleList {
    pub tabs: Vec<TabDescriptor>,
    /// The window's MRU list was reconciled and needs persisting
    pub mru_changed: bool,
}

pub fn build_cycle_list<S: TabSystem>(
    state: &mut State,
    system: &S,
    window_id: WindowId,
) -> CycleList {
    let live = system.tabs_in_window(window_id);
    let Some(active) = live.iter().find(|t| t.active) else {
        tracing::debug!("No active tab in window {}, nothing to cycle", window_id);
        return CycleList::default();
    };

    // Forget tabs that closed without us hearing about it
    let live_ids: HashSet<TabId> = live.iter().map(|t| t.id).collect();
    let mut mru_changed = state.mru.retain_tabs(window_id, &live_ids);

    // Self-heal a missed activation
    if state.mru.list(window_id).first() != Some(&active.id) {
        tracing::debug!(
            "Active tab {} not at MRU front in window {}, correcting",
            active.id,
            window_id
        );
        mru_changed |= state.mru.touch(window_id, active.id);
    }

    let by_id: HashMap<TabId, &Tab> = live.iter().map(|t| (t.id, t)).collect();
    let untitled = state.config.untitled_title.as_str();
    let order = state.mru.list(window_id);

    let mut tabs: Vec<TabDescriptor> = order
        .iter()
        .filter_map(|id| by_id.get(id))
        .map(|t| t.descriptor(untitled))
        .collect();

    if state.config.append_untracked_tabs {
        let tracked: HashSet<TabId> = order.iter().copied().collect();
        tabs.extend(
            live.iter()
                .filter(|t| !tracked.contains(&t.id))
                .map(|t| t.descriptor(untitled)),
        );
    }

    CycleList { tabs, mru_changed }
}
