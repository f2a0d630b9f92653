use tabcycle_ipc::{SessionInfo, TabDescriptor};

use super::{TabId, WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Forward,
    Reverse,
}

/// An in-progress cycling interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub window_id: WindowId,
    /// Tab the overlay is displayed in
    pub anchor_tab_id: TabId,
    pub snapshot: Vec<TabDescriptor>,
    pub highlight_index: usize,
}

impl ActiveSession {
    pub fn highlighted(&self) -> Option<&TabDescriptor> {
        self.snapshot.get(self.highlight_index)
    }
}

/// Outcome of removing a tab from the active snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotRemoval {
    /// The tab was not part of the snapshot
    Unchanged,
    /// The tab was removed and entries remain
    Shrunk,
    /// The snapshot is now empty
    Emptied,
}

/// Process-wide cycling state. `None` is Idle.
#[derive(Debug, Clone, Default)]
pub struct CycleSession {
    active: Option<ActiveSession>,
}

impl CycleSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_active_in(&self, window_id: WindowId) -> bool {
        self.active
            .as_ref()
            .is_some_and(|s| s.window_id == window_id)
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    /// Start a session; the highlight lands one step away from the current tab.
    pub fn begin(
        &mut self,
        window_id: WindowId,
        anchor_tab_id: TabId,
        snapshot: Vec<TabDescriptor>,
        direction: CycleDirection,
    ) -> &ActiveSession {
        let len = snapshot.len();
        let highlight_index = match direction {
            CycleDirection::Forward if len > 1 => 1,
            CycleDirection::Reverse if len > 0 => len - 1,
            _ => 0,
        };
        tracing::info!(
            "Cycle session started in window {} (anchor {}, {} tabs, highlight {})",
            window_id,
            anchor_tab_id,
            len,
            highlight_index
        );
        self.active.insert(ActiveSession {
            window_id,
            anchor_tab_id,
            snapshot,
            highlight_index,
        })
    }

    /// Move the highlight one step, wrapping at both ends.
    /// Returns the new index, or `None` when idle or the snapshot is empty.
    pub fn step(&mut self, direction: CycleDirection) -> Option<usize> {
        let session = self.active.as_mut()?;
        let len = session.snapshot.len();
        if len == 0 {
            return None;
        }
        session.highlight_index = match direction {
            CycleDirection::Forward => (session.highlight_index + 1) % len,
            CycleDirection::Reverse => (session.highlight_index + len - 1) % len,
        };
        Some(session.highlight_index)
    }

    /// Drop a closed tab from the snapshot and clamp the highlight.
    pub fn remove_tab(&mut self, tab_id: TabId) -> SnapshotRemoval {
        let Some(session) = self.active.as_mut() else {
            return SnapshotRemoval::Unchanged;
        };
        let len = session.snapshot.len();
        session.snapshot.retain(|t| t.id != tab_id);
        if session.snapshot.len() == len {
            return SnapshotRemoval::Unchanged;
        }
        if session.snapshot.is_empty() {
            session.highlight_index = 0;
            return SnapshotRemoval::Emptied;
        }
        if session.highlight_index >= session.snapshot.len() {
            session.highlight_index = session.snapshot.len() - 1;
        }
        SnapshotRemoval::Shrunk
    }

    /// Leave the session, returning what it held.
    pub fn end(&mut self) -> Option<ActiveSession> {
        let ended = self.active.take();
        if let Some(session) = &ended {
            tracing::info!(
                "Cycle session ended in window {} (anchor {})",
                session.window_id,
                session.anchor_tab_id
            );
        }
        ended
    }

    pub fn info(&self) -> SessionInfo {
        match &self.active {
            Some(session) => SessionInfo {
                active: true,
                window_id: Some(session.window_id),
                anchor_tab_id: Some(session.anchor_tab_id),
                highlight_index: session.highlight_index,
                snapshot: session.snapshot.clone(),
            },
            None => SessionInfo::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptors(ids: &[TabId]) -> Vec<TabDescriptor> {
        ids.iter()
            .map(|&id| TabDescriptor {
                id,
                title: format!("Tab {}", id),
                fav_icon_url: String::new(),
                url: String::new(),
            })
            .collect()
    }

    fn highlight(session: &CycleSession) -> usize {
        session.active().unwrap().highlight_index
    }

    #[test]
    fn test_forward_begin_highlights_previous_tab() {
        let mut session = CycleSession::new();
        let active = session.begin(1, 10, descriptors(&[10, 20, 30]), CycleDirection::Forward);
        assert_eq!(active.highlight_index, 1);
        assert_eq!(active.highlighted().unwrap().id, 20);
    }

    #[test]
    fn test_forward_begin_single_tab() {
        let mut session = CycleSession::new();
        session.begin(1, 10, descriptors(&[10]), CycleDirection::Forward);
        assert_eq!(highlight(&session), 0);
    }

    #[test]
    fn test_forward_steps_wrap() {
        let mut session = CycleSession::new();
        session.begin(1, 10, descriptors(&[10, 20, 30]), CycleDirection::Forward);
        assert_eq!(session.step(CycleDirection::Forward), Some(2));
        assert_eq!(session.step(CycleDirection::Forward), Some(0));
    }

    #[test]
    fn test_reverse_begin_highlights_last() {
        let mut session = CycleSession::new();
        session.begin(1, 10, descriptors(&[10, 20, 30]), CycleDirection::Reverse);
        assert_eq!(highlight(&session), 2);
        assert_eq!(session.step(CycleDirection::Reverse), Some(1));
        assert_eq!(session.step(CycleDirection::Reverse), Some(0));
        assert_eq!(session.step(CycleDirection::Reverse), Some(2));
    }

    #[test]
    fn test_empty_snapshot() {
        let mut session = CycleSession::new();
        session.begin(1, 10, vec![], CycleDirection::Reverse);
        assert_eq!(highlight(&session), 0);
        assert_eq!(session.step(CycleDirection::Forward), None);
        assert_eq!(session.step(CycleDirection::Reverse), None);
        assert!(session.active().unwrap().highlighted().is_none());
    }

    #[test]
    fn test_step_while_idle() {
        let mut session = CycleSession::new();
        assert_eq!(session.step(CycleDirection::Forward), None);
        assert!(!session.is_active());
    }

    #[test]
    fn test_remove_highlighted_last_entry_clamps() {
        let mut session = CycleSession::new();
        session.begin(1, 10, descriptors(&[10, 20, 30]), CycleDirection::Reverse);
        assert_eq!(session.remove_tab(30), SnapshotRemoval::Shrunk);
        assert_eq!(highlight(&session), 1);
        assert_eq!(session.active().unwrap().highlighted().unwrap().id, 20);
    }

    #[test]
    fn test_remove_tab_not_in_snapshot() {
        let mut session = CycleSession::new();
        session.begin(1, 10, descriptors(&[10, 20]), CycleDirection::Forward);
        assert_eq!(session.remove_tab(99), SnapshotRemoval::Unchanged);
        assert_eq!(session.active().unwrap().snapshot.len(), 2);
    }

    #[test]
    fn test_remove_all_tabs_empties() {
        let mut session = CycleSession::new();
        session.begin(1, 10, descriptors(&[10]), CycleDirection::Forward);
        assert_eq!(session.remove_tab(10), SnapshotRemoval::Emptied);
    }

    #[test]
    fn test_end_clears_state() {
        let mut session = CycleSession::new();
        session.begin(3, 10, descriptors(&[10, 20]), CycleDirection::Forward);
        assert!(session.is_active_in(3));
        assert!(!session.is_active_in(4));

        let ended = session.end().unwrap();
        assert_eq!(ended.window_id, 3);
        assert!(!session.is_active());
        assert!(session.end().is_none());

        let info = session.info();
        assert!(!info.active);
        assert_eq!(info.window_id, None);
        assert!(info.snapshot.is_empty());
    }
}
