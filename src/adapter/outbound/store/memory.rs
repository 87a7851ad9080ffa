//! In-memory store shared between clones.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::{FillTable, WalletId};
use crate::error::Result;
use crate::port::SnapshotStore;

/// Keeps tables in a shared map. Clones see the same data, which lets a
/// test drop an engine and rehydrate a new one from the "same disk".
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<HashMap<WalletId, FillTable>>>,
    saves: Arc<AtomicUsize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last saved table for `wallet`.
    #[must_use]
    pub fn table(&self, wallet: &WalletId) -> Option<FillTable> {
        self.tables.read().get(wallet).cloned()
    }

    /// Number of successful saves across all wallets.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, wallet: &WalletId) -> Result<FillTable> {
        Ok(self.table(wallet).unwrap_or_default())
    }

    fn save(&self, wallet: &WalletId, fills: &FillTable) -> Result<()> {
        self.tables.write().insert(wallet.clone(), fills.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
