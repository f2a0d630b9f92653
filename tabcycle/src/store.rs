use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{MruStore, TabId, WindowId};
use crate::error::Result;

/// Durable home of the MRU lists.
pub trait MruPersistence {
    fn load(&self) -> Result<MruStore>;
    fn save(&self, store: &MruStore) -> Result<()>;
}

/// On-disk document: `{"mruByWindow": {"<window id>": [tab ids]}}`
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedMru {
    #[serde(rename = "mruByWindow", default)]
    mru_by_window: BTreeMap<String, Vec<TabId>>,
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MruPersistence for JsonFileStore {
    fn load(&self) -> Result<MruStore> {
        if !self.path.exists() {
            tracing::info!("No MRU store at {:?}, starting empty", self.path);
            return Ok(MruStore::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(MruStore::new());
        }

        let persisted: PersistedMru = serde_json::from_str(&contents)?;
        let mut lists = HashMap::new();
        for (key, tabs) in persisted.mru_by_window {
            match key.parse::<WindowId>() {
                Ok(window_id) => {
                    lists.insert(window_id, tabs);
                }
                Err(_) => tracing::warn!("Skipping MRU entry with bad window key {:?}", key),
            }
        }

        tracing::info!("Loaded MRU lists for {} windows from {:?}", lists.len(), self.path);
        Ok(MruStore::from_lists(lists))
    }

    fn save(&self, store: &MruStore) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let persisted = PersistedMru {
            mru_by_window: store.to_persisted(),
        };
        let bytes = serde_json::to_vec(&persisted)?;

        // Readers only ever see a complete document
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, &bytes)?;
        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }

        tracing::trace!("Saved MRU store to {:?}", self.path);
        Ok(())
    }
}
