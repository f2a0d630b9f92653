use std::cell::RefCell;

use crate::core::State;
use crate::effect::Effect;
use crate::error::Error;
use crate::platform::{TabManipulator, TabSystem};
use crate::store::MruPersistence;

/// Execute side effects.
///
/// Nothing here fails the command: persistence and delivery errors are
/// logged and the session is kept consistent with what the browser shows.
pub fn execute_effects<S: TabSystem, M: TabManipulator, P: MruPersistence>(
    effects: Vec<Effect>,
    state: &RefCell<State>,
    system: &S,
    manipulator: &M,
    persistence: &P,
) {
    for effect in effects {
        match effect {
            Effect::PersistMru => {
                if let Err(e) = persistence.save(&state.borrow().mru) {
                    tracing::warn!("Failed to persist MRU store: {}", e);
                }
            }
            Effect::ShowOverlay { tab_id } => {
                let shown = match system.get_tab(tab_id) {
                    Some(tab) => manipulator.show_overlay(&tab),
                    None => false,
                };
                if !shown {
                    // Without an overlay there is nothing to commit or cancel
                    tracing::info!("Overlay unavailable in tab {}, abandoning cycle", tab_id);
                    state.borrow_mut().session.end();
                    return;
                }
            }
            Effect::HideOverlay { tab_id } => {
                if let Err(e) = manipulator.hide_overlay(tab_id) {
                    tracing::debug!("Failed to hide overlay in tab {}: {}", tab_id, e);
                }
            }
            Effect::RenderOverlay {
                tab_id,
                tabs,
                highlight_index,
            } => {
                if let Err(e) = manipulator.render_overlay(tab_id, &tabs, highlight_index) {
                    tracing::debug!("Failed to render overlay in tab {}: {}", tab_id, e);
                }
            }
            Effect::ActivateTab { tab_id } => {
                if system.get_tab(tab_id).is_none() {
                    tracing::warn!("Not activating: {}", Error::StaleTab(tab_id));
                    continue;
                }
                if let Err(e) = manipulator.activate_tab(tab_id) {
                    tracing::warn!("Failed to activate tab {}: {}", tab_id, e);
                }
            }
        }
    }
}
