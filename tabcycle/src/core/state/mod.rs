use super::{Config, CycleDirection, CycleSession, MruStore, TabId, WindowId};
use crate::effect::Effect;
use crate::platform::TabSystem;
use tabcycle_ipc::{HostEvent, MruInfo};

mod cycle_list;
mod cycling;
mod lifecycle;

use cycle_list::*;
use cycling::*;
use lifecycle::*;

/// Everything the daemon owns: the MRU store and the cycling session.
pub struct State {
    pub mru: MruStore,
    pub session: CycleSession,
    pub config: Config,
}

impl State {
    pub fn new(config: Config, mru: MruStore) -> Self {
        Self {
            mru,
            session: CycleSession::new(),
            config,
        }
    }

    /// Forward or reverse cycle trigger: start a session or move the highlight.
    pub fn cycle<S: TabSystem>(&mut self, system: &S, direction: CycleDirection) -> Vec<Effect> {
        trigger(self, system, direction)
    }

    pub fn commit(&mut self) -> Vec<Effect> {
        commit(self)
    }

    pub fn pick(&mut self, tab_id: TabId) -> Vec<Effect> {
        pick(self, tab_id)
    }

    pub fn cancel(&mut self) -> Vec<Effect> {
        cancel(self)
    }

    pub fn handle_host_event<S: TabSystem>(&mut self, system: &S, event: &HostEvent) -> Vec<Effect> {
        handle_host_event(self, system, event)
    }

    pub fn mru_info(&self, window_id: Option<WindowId>) -> Vec<MruInfo> {
        let window_ids = match window_id {
            Some(id) if self.mru.contains_window(id) => vec![id],
            Some(_) => vec![],
            None => self.mru.window_ids(),
        };
        window_ids
            .into_iter()
            .map(|id| MruInfo {
                window_id: id,
                tabs: self.mru.list(id).to_vec(),
            })
            .collect()
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(Config::default(), MruStore::default())
    }
}
