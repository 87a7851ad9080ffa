//! [`SnapshotStore`] that fails a scripted number of saves.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::{FillTable, WalletId};
use crate::error::{Error, Result};
use crate::port::SnapshotStore;

/// Loads nothing and rejects the first `failures` saves.
#[derive(Clone, Default)]
pub struct FailingStore {
    remaining_failures: Arc<AtomicUsize>,
    saved: Arc<Mutex<Option<FillTable>>>,
}

impl FailingStore {
    pub fn new(failures: usize) -> Self {
        Self {
            remaining_failures: Arc::new(AtomicUsize::new(failures)),
            saved: Arc::default(),
        }
    }

    /// Last table accepted by a save.
    pub fn saved(&self) -> Option<FillTable> {
        self.saved.lock().clone()
    }
}

impl SnapshotStore for FailingStore {
    fn load(&self, _wallet: &WalletId) -> Result<FillTable> {
        Ok(FillTable::new())
    }

    fn save(&self, _wallet: &WalletId, fills: &FillTable) -> Result<()> {
        let failed = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(Error::Store("scripted save failure".into()));
        }
        *self.saved.lock() = Some(fills.clone());
        Ok(())
    }
}
