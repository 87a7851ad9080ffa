//! Per-wallet reconciliation state.

use std::collections::BTreeMap;

use super::fill::FillTable;
use super::id::PositionKey;
use super::position::PositionSnapshot;

/// Active positions of one wallet, keyed by `(coin, side)`.
pub type PositionTable = BTreeMap<PositionKey, PositionSnapshot>;

/// Everything the reconciler remembers about one wallet.
///
/// `positions` is replaced wholesale on every position pass. `fills` only
/// ever grows: it is the persisted record of fills already notified.
#[derive(Debug, Clone, Default)]
pub struct WalletState {
    pub positions: PositionTable,
    pub fills: FillTable,
    /// Set when `fills` holds entries the store has not accepted yet.
    pub unflushed: bool,
}

impl WalletState {
    /// State rehydrated from a persisted fills table.
    #[must_use]
    pub fn with_fills(fills: FillTable) -> Self {
        Self {
            positions: PositionTable::new(),
            fills,
            unflushed: false,
        }
    }
}
