//! Snapshot store port for the per-wallet seen-fills table.

use crate::domain::{FillTable, WalletId};
use crate::error::Result;

/// Durable record of fills already notified, one table per wallet.
pub trait SnapshotStore: Send + Sync {
    /// Load the persisted table, or an empty one if nothing was saved yet.
    fn load(&self, wallet: &WalletId) -> Result<FillTable>;

    /// Atomically replace the persisted table for `wallet`.
    ///
    /// Concurrent saves for the same wallet are serialized.
    fn save(&self, wallet: &WalletId, fills: &FillTable) -> Result<()>;
}
