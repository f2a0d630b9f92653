use std::collections::{BTreeMap, HashMap, HashSet};

use super::{TabId, WindowId};

/// Most-recently-used tab order per window, newest first.
///
/// Every mutator returns whether the store changed so callers can persist
/// only when needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MruStore {
    lists: HashMap<WindowId, Vec<TabId>>,
}

impl MruStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lists(lists: HashMap<WindowId, Vec<TabId>>) -> Self {
        let mut store = Self::new();
        for (window_id, tabs) in lists {
            let mut seen = HashSet::new();
            let deduped: Vec<TabId> = tabs.into_iter().filter(|id| seen.insert(*id)).collect();
            store.lists.insert(window_id, deduped);
        }
        store
    }

    pub fn list(&self, window_id: WindowId) -> &[TabId] {
        self.lists.get(&window_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_window(&self, window_id: WindowId) -> bool {
        self.lists.contains_key(&window_id)
    }

    /// Window ids in ascending order.
    pub fn window_ids(&self) -> Vec<WindowId> {
        let mut ids: Vec<_> = self.lists.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Move `tab_id` to the front of the window's list.
    pub fn touch(&mut self, window_id: WindowId, tab_id: TabId) -> bool {
        let list = self.lists.entry(window_id).or_default();
        if list.first() == Some(&tab_id) {
            return false;
        }
        list.retain(|&id| id != tab_id);
        list.insert(0, tab_id);
        tracing::debug!("MRU touch: window {} -> {:?}", window_id, list);
        true
    }

    /// Place `tab_id` right behind the current tab, so it becomes the
    /// "previous tab" without displacing the front.
    pub fn insert_as_second(&mut self, window_id: WindowId, tab_id: TabId) -> bool {
        let list = self.lists.entry(window_id).or_default();
        if list.get(1) == Some(&tab_id) {
            return false;
        }
        let before = list.clone();
        list.retain(|&id| id != tab_id);
        let position = list.len().min(1);
        list.insert(position, tab_id);
        tracing::debug!("MRU insert second: window {} -> {:?}", window_id, list);
        *list != before
    }

    /// Remove `tab_id` from every window's list.
    pub fn remove(&mut self, tab_id: TabId) -> bool {
        let mut changed = false;
        for list in self.lists.values_mut() {
            let len = list.len();
            list.retain(|&id| id != tab_id);
            changed |= list.len() != len;
        }
        changed
    }

    pub fn remove_window(&mut self, window_id: WindowId) -> bool {
        self.lists.remove(&window_id).is_some()
    }

    /// Create an empty list for the window if it has none.
    pub fn ensure_window(&mut self, window_id: WindowId) -> bool {
        if self.lists.contains_key(&window_id) {
            return false;
        }
        self.lists.insert(window_id, Vec::new());
        true
    }

    /// Drop lists of windows not in `live`.
    pub fn retain_windows(&mut self, live: &HashSet<WindowId>) -> bool {
        let len = self.lists.len();
        self.lists.retain(|id, _| live.contains(id));
        self.lists.len() != len
    }

    /// Drop entries of the window's list that are not in `live`.
    pub fn retain_tabs(&mut self, window_id: WindowId, live: &HashSet<TabId>) -> bool {
        let Some(list) = self.lists.get_mut(&window_id) else {
            return false;
        };
        let len = list.len();
        list.retain(|id| live.contains(id));
        list.len() != len
    }

    /// Persisted shape: window id as a string key, tab ids in order.
    pub fn to_persisted(&self) -> BTreeMap<String, Vec<TabId>> {
        self.lists
            .iter()
            .map(|(window_id, tabs)| (window_id.to_string(), tabs.clone()))
            .collect()
    }
}
