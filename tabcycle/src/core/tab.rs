use tabcycle_ipc::{TabDescriptor, TabInfo};

pub type TabId = u32;
pub type WindowId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: TabId,
    pub window_id: WindowId,
    pub active: bool,
    pub title: String,
    pub fav_icon_url: Option<String>,
    pub url: Option<String>,
}

impl Tab {
    pub fn from_tab_info(info: &TabInfo) -> Self {
        Self {
            id: info.id,
            window_id: info.window_id,
            active: info.active,
            title: info.title.clone().unwrap_or_default(),
            fav_icon_url: info.fav_icon_url.clone(),
            url: info.url.clone(),
        }
    }

    /// Project the tab for the overlay, substituting `untitled` for an empty title.
    pub fn descriptor(&self, untitled: &str) -> TabDescriptor {
        TabDescriptor {
            id: self.id,
            title: if self.title.is_empty() {
                untitled.to_string()
            } else {
                self.title.clone()
            },
            fav_icon_url: self.fav_icon_url.clone().unwrap_or_default(),
            url: self.url.clone().unwrap_or_default(),
        }
    }

    pub fn url_str(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }
}
