use std::path::PathBuf;

const DEFAULT_UNTITLED: &str = "Untitled";
const RESTRICTED_URL_PREFIXES: [&str; 4] = ["chrome://", "chrome-extension://", "edge://", "about:"];

/// Daemon configuration settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// File the MRU lists are persisted to
    pub store_path: PathBuf,
    /// Append live tabs missing from the MRU list to the end of a cycle list
    pub append_untracked_tabs: bool,
    /// Title shown for tabs without one
    pub untitled_title: String,
    /// Pages the overlay cannot be injected into
    pub restricted_url_prefixes: Vec<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_store_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("tabcycle")
            .join("mru.json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: Self::default_store_path(),
            append_untracked_tabs: true,
            untitled_title: DEFAULT_UNTITLED.to_string(),
            restricted_url_prefixes: RESTRICTED_URL_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}
