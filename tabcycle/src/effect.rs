use crate::core::TabId;

use tabcycle_ipc::{Response, TabDescriptor};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Write the whole MRU store through to persistence
    PersistMru,
    /// Show the overlay; failure abandons the active session
    ShowOverlay {
        tab_id: TabId,
    },
    HideOverlay {
        tab_id: TabId,
    },
    RenderOverlay {
        tab_id: TabId,
        tabs: Vec<TabDescriptor>,
        highlight_index: usize,
    },
    ActivateTab {
        tab_id: TabId,
    },
}

pub struct CommandResult {
    pub response: Response,
    pub effects: Vec<Effect>,
}

impl CommandResult {
    pub fn ok() -> Self {
        Self {
            response: Response::Ok,
            effects: vec![],
        }
    }

    pub fn ok_with_effects(effects: Vec<Effect>) -> Self {
        Self {
            response: Response::Ok,
            effects,
        }
    }

    pub fn with_response(response: Response) -> Self {
        Self {
            response,
            effects: vec![],
        }
    }
}
