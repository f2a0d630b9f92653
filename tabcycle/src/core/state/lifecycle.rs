use std::collections::HashSet;

use super::super::{TabId, WindowId};
use super::cycling::{cancel, remove_from_session};
use super::State;
use crate::effect::Effect;
use crate::platform::TabSystem;
use tabcycle_ipc::{HostEvent, TabInfo};

/// Apply a browser lifecycle event to the MRU store and the session.
/// `system` must already reflect the event.
pub fn handle_host_event<S: TabSystem>(
    state: &mut State,
    system: &S,
    event: &HostEvent,
) -> Vec<Effect> {
    let mut mru_changed = false;
    let mut effects = Vec::new();

    match event {
        HostEvent::Sync { .. } => {
            mru_changed = reconcile(state, system);
            let anchor_gone = state
                .session
                .active()
                .is_some_and(|s| system.get_tab(s.anchor_tab_id).is_none());
            if anchor_gone {
                tracing::info!("Anchor tab gone after sync, dropping cycle session");
                state.session.end();
            }
        }
        HostEvent::TabCreated { tab } => {
            mru_changed = tab_created(state, system, tab);
        }
        HostEvent::TabUpdated { .. } | HostEvent::WindowCreated { .. } => {}
        HostEvent::TabActivated { tab_id, window_id } => {
            mru_changed = state.mru.touch(*window_id, *tab_id);
        }
        HostEvent::TabRemoved {
            tab_id, window_id, ..
        } => {
            mru_changed = state.mru.remove(*tab_id);
            if state.session.is_active_in(*window_id) {
                effects.extend(remove_from_session(state, *tab_id));
            }
        }
        HostEvent::WindowFocusChanged { window_id: None } => {}
        HostEvent::WindowFocusChanged {
            window_id: Some(window_id),
        } => {
            if state.session.is_active() && !state.session.is_active_in(*window_id) {
                tracing::debug!("Focus moved to window {}, cancelling cycle", window_id);
                effects.extend(cancel(state));
            }
            if let Some(tab) = system.active_tab_in_window(*window_id) {
                mru_changed = state.mru.touch(*window_id, tab.id);
            }
        }
        HostEvent::WindowRemoved { window_id } => {
            if state.session.is_active_in(*window_id) {
                effects.extend(cancel(state));
            }
            mru_changed = state.mru.remove_window(*window_id);
        }
    }

    if mru_changed {
        effects.insert(0, Effect::PersistMru);
    }
    effects
}

/// A new tab opened in the background becomes the "previous tab".
fn tab_created<S: TabSystem>(state: &mut State, system: &S, tab: &TabInfo) -> bool {
    if state.session.is_active() {
        return false;
    }
    let Some(active) = system.focused_active_tab() else {
        return false;
    };
    if active.id == tab.id {
        return false;
    }
    state.mru.insert_as_second(tab.window_id, tab.id)
}

/// Line the store up with the full window list after a sync: drop lists of
/// windows that are gone, create missing ones, and record each window's
/// active tab if the list has never seen it.
pub fn reconcile<S: TabSystem>(state: &mut State, system: &S) -> bool {
    let windows = system.windows();
    let live: HashSet<WindowId> = windows.iter().copied().collect();
    let mut changed = state.mru.retain_windows(&live);

    for window_id in windows {
        changed |= state.mru.ensure_window(window_id);
        let Some(active) = system.active_tab_in_window(window_id) else {
            continue;
        };
        let known: &[TabId] = state.mru.list(window_id);
        if !known.contains(&active.id) {
            changed |= state.mru.touch(window_id, active.id);
        }
    }

    if changed {
        tracing::info!("MRU store reconciled with {} live windows", live.len());
    }
    changed
}
