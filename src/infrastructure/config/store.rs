//! Seen-fills persistence configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// `[store]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Directory holding one `fills_{wallet}.json` per wallet.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

fn default_dir() -> PathBuf {
    PathBuf::from("state")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}
