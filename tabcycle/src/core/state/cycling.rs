use super::super::{ActiveSession, CycleDirection, SnapshotRemoval, TabId};
use super::cycle_list::build_cycle_list;
use super::State;
use crate::effect::Effect;
use crate::platform::TabSystem;

pub fn trigger<S: TabSystem>(state: &mut State, system: &S, direction: CycleDirection) -> Vec<Effect> {
    let Some(tab) = system.focused_active_tab() else {
        tracing::debug!("Cycle triggered without an active tab");
        return vec![];
    };
    let window_id = tab.window_id;

    if state.session.is_active_in(window_id) {
        if state.session.step(direction).is_none() {
            return vec![];
        }
        return state.session.active().map(render).into_iter().collect();
    }

    let mut effects = Vec::new();

    // An overlay left open in another window would never be dismissed
    if state.session.is_active() {
        tracing::info!(
            "Cycle triggered in window {} while another window owns the session",
            window_id
        );
        effects.extend(cancel(state));
    }

    let list = build_cycle_list(state, system, window_id);
    if list.mru_changed {
        effects.push(Effect::PersistMru);
    }

    let session = state.session.begin(window_id, tab.id, list.tabs, direction);
    effects.push(Effect::ShowOverlay { tab_id: tab.id });
    effects.push(render(session));
    effects
}

pub fn commit(state: &mut State) -> Vec<Effect> {
    let Some(session) = state.session.end() else {
        return vec![];
    };

    let mut effects = Vec::new();
    if let Some(selected) = session.highlighted() {
        effects.push(Effect::ActivateTab {
            tab_id: selected.id,
        });
    }
    effects.push(Effect::HideOverlay {
        tab_id: session.anchor_tab_id,
    });
    effects
}

/// A tab picked directly in the overlay.
pub fn pick(state: &mut State, tab_id: TabId) -> Vec<Effect> {
    let mut effects = vec![Effect::ActivateTab { tab_id }];
    if let Some(session) = state.session.end() {
        effects.push(Effect::HideOverlay {
            tab_id: session.anchor_tab_id,
        });
    }
    effects
}

pub fn cancel(state: &mut State) -> Vec<Effect> {
    match state.session.end() {
        Some(session) => vec![Effect::HideOverlay {
            tab_id: session.anchor_tab_id,
        }],
        None => vec![],
    }
}

/// Keep the snapshot in step with a tab that closed mid-session.
pub fn remove_from_session(state: &mut State, tab_id: TabId) -> Vec<Effect> {
    let Some(session) = state.session.active() else {
        return vec![];
    };

    if session.anchor_tab_id == tab_id {
        // The overlay closed along with its tab
        state.session.end();
        return vec![];
    }

    match state.session.remove_tab(tab_id) {
        SnapshotRemoval::Unchanged => vec![],
        SnapshotRemoval::Shrunk => state.session.active().map(render).into_iter().collect(),
        SnapshotRemoval::Emptied => cancel(state),
    }
}

fn render(session: &ActiveSession) -> Effect {
    Effect::RenderOverlay {
        tab_id: session.anchor_tab_id,
        tabs: session.snapshot.clone(),
        highlight_index: session.highlight_index,
    }
}
