//! Directory of JSON files, one per wallet.
//!
//! Each wallet's seen-fills table lives in `fills_{wallet}.json` as a
//! pretty-printed object keyed `"{coin}_{tid}"`. Writes go to a temp file
//! that is synced and renamed over the target, so a crash mid-write leaves
//! the previous table intact.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::{FillTable, WalletId};
use crate::error::{Error, Result};
use crate::port::SnapshotStore;

/// File-backed store rooted at a directory.
pub struct JsonFileStore {
    dir: PathBuf,
    /// Per-wallet write locks; saves for different wallets do not contend.
    locks: Mutex<HashMap<WalletId, Arc<Mutex<()>>>>,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `wallet`'s table.
    ///
    /// Lowercase ASCII letters and digits are kept; every other byte
    /// becomes `_xx` (hex), so distinct wallets never share a file.
    #[must_use]
    pub fn path_for(&self, wallet: &WalletId) -> PathBuf {
        let mut safe = String::with_capacity(wallet.as_str().len());
        for byte in wallet.as_str().bytes() {
            if byte.is_ascii_lowercase() || byte.is_ascii_digit() {
                safe.push(char::from(byte));
            } else {
                safe.push_str(&format!("_{byte:02x}"));
            }
        }
        self.dir.join(format!("fills_{safe}.json"))
    }

    fn lock_for(&self, wallet: &WalletId) -> Arc<Mutex<()>> {
        Arc::clone(self.locks.lock().entry(wallet.clone()).or_default())
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self, wallet: &WalletId) -> Result<FillTable> {
        let path = self.path_for(wallet);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(FillTable::new()),
            Err(e) => return Err(e.into()),
        };
        if json.trim().is_empty() {
            return Ok(FillTable::new());
        }
        serde_json::from_str(&json)
            .map_err(|e| Error::Store(format!("{}: {e}", path.display())))
    }

    fn save(&self, wallet: &WalletId, fills: &FillTable) -> Result<()> {
        let json = serde_json::to_string_pretty(fills)?;
        let path = self.path_for(wallet);

        let lock = self.lock_for(wallet);
        let _guard = lock.lock();

        fs::create_dir_all(&self.dir)?;

        let temp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path)?;

        let cleanup_and_err = |e| {
            let _ = fs::remove_file(&temp_path);
            e
        };

        file.write_all(json.as_bytes()).map_err(cleanup_and_err)?;
        file.sync_all().map_err(cleanup_and_err)?;
        drop(file);
        fs::rename(&temp_path, &path).map_err(cleanup_and_err)?;

        debug!(wallet = %wallet, path = %path.display(), fills = fills.len(), "Fills table saved");
        Ok(())
    }
}
