//! Diff engine: turns successive wallet snapshots into domain events.
//!
//! Positions and fills are reconciled with deliberately different rules.
//! A position payload is a full replacement of the wallet's position table,
//! and only the presence or absence of a key produces events. A fill payload
//! is merged into the wallet's seen-fills table, which never forgets an
//! entry and is persisted through the [`SnapshotStore`] before the pass
//! returns, so a fill is announced at most once across restarts.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::{
    DomainEvent, Fill, FillTable, PositionTable, RawPosition, WalletId, WalletState,
};
use crate::port::SnapshotStore;

/// Owns all per-wallet state and the store used to persist seen fills.
pub struct DiffEngine {
    store: Arc<dyn SnapshotStore>,
    wallets: HashMap<WalletId, WalletState>,
}

impl DiffEngine {
    /// Create an engine with no tracked wallets.
    #[must_use]
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            store,
            wallets: HashMap::new(),
        }
    }

    /// Create an engine and rehydrate every wallet from the store.
    #[must_use]
    pub fn hydrate<'a>(
        store: Arc<dyn SnapshotStore>,
        wallets: impl IntoIterator<Item = &'a WalletId>,
    ) -> Self {
        let mut engine = Self::new(store);
        for wallet in wallets {
            engine.track(wallet);
        }
        engine
    }

    /// Start tracking `wallet`, loading its seen fills from the store.
    ///
    /// Tracking an already tracked wallet keeps its current state.
    pub fn track(&mut self, wallet: &WalletId) {
        if self.wallets.contains_key(wallet) {
            return;
        }
        let state = load_state(self.store.as_ref(), wallet);
        self.wallets.insert(wallet.clone(), state);
    }

    /// Current state of a tracked wallet.
    #[must_use]
    pub fn state(&self, wallet: &WalletId) -> Option<&WalletState> {
        self.wallets.get(wallet)
    }

    /// Reconcile a full position payload for `wallet`.
    ///
    /// Emits `PositionOpened` for keys new to the wallet (in key order),
    /// then `PositionClosed` for keys that vanished, carrying the last-known
    /// snapshot. The wallet's position table is then replaced by the payload.
    /// An empty payload therefore closes every open position.
    pub fn reconcile_positions(
        &mut self,
        wallet: &WalletId,
        raw_positions: Vec<RawPosition>,
    ) -> Vec<DomainEvent> {
        let fresh: PositionTable = raw_positions
            .into_iter()
            .filter_map(RawPosition::into_snapshot)
            .map(|snapshot| (snapshot.key(), snapshot))
            .collect();

        let store = self.store.as_ref();
        let state = self
            .wallets
            .entry(wallet.clone())
            .or_insert_with(|| load_state(store, wallet));

        let mut events = Vec::new();

        for (key, snapshot) in &fresh {
            if !state.positions.contains_key(key) {
                info!(wallet = %wallet, position = %key, "New position detected");
                events.push(DomainEvent::PositionOpened {
                    wallet: wallet.clone(),
                    snapshot: snapshot.clone(),
                });
            }
        }

        for (key, snapshot) in &state.positions {
            if !fresh.contains_key(key) {
                info!(wallet = %wallet, position = %key, "Position closed");
                events.push(DomainEvent::PositionClosed {
                    wallet: wallet.clone(),
                    snapshot: snapshot.clone(),
                });
            }
        }

        debug!(
            wallet = %wallet,
            open = fresh.len(),
            events = events.len(),
            "Positions reconciled"
        );
        state.positions = fresh;
        events
    }

    /// Reconcile a fill payload for `wallet`.
    ///
    /// Emits `FillObserved` for every fill whose `(coin, tid)` is not yet in
    /// the wallet's seen-fills table, oldest first. The table is extended by
    /// union and flushed to the store before returning. A failed flush is
    /// logged and retried on the next pass.
    pub fn reconcile_fills(&mut self, wallet: &WalletId, raw_fills: Vec<Fill>) -> Vec<DomainEvent> {
        let fresh: FillTable = raw_fills.into_iter().map(|fill| (fill.key(), fill)).collect();

        let store = self.store.as_ref();
        let state = self
            .wallets
            .entry(wallet.clone())
            .or_insert_with(|| load_state(store, wallet));

        let mut unseen: Vec<Fill> = fresh
            .into_iter()
            .filter(|(key, _)| !state.fills.contains_key(key))
            .map(|(_, fill)| fill)
            .collect();
        unseen.sort_by_key(|fill| fill.timestamp);

        let mut events = Vec::with_capacity(unseen.len());
        for fill in unseen {
            info!(wallet = %wallet, fill = %fill.key(), dir = %fill.direction, "New fill detected");
            state.fills.insert(fill.key(), fill.clone());
            state.unflushed = true;
            events.push(DomainEvent::FillObserved {
                wallet: wallet.clone(),
                fill,
            });
        }

        if state.unflushed {
            match store.save(wallet, &state.fills) {
                Ok(()) => {
                    state.unflushed = false;
                    debug!(wallet = %wallet, seen = state.fills.len(), "Seen fills persisted");
                }
                Err(e) => {
                    error!(
                        wallet = %wallet,
                        error = %e,
                        "Failed to persist seen fills, will retry on next pass"
                    );
                }
            }
        }

        events
    }
}

fn load_state(store: &dyn SnapshotStore, wallet: &WalletId) -> WalletState {
    match store.load(wallet) {
        Ok(fills) => {
            info!(wallet = %wallet, seen = fills.len(), "Rehydrated seen fills");
            WalletState::with_fills(fills)
        }
        Err(e) => {
            warn!(
                wallet = %wallet,
                error = %e,
                "Failed to load seen fills, starting empty"
            );
            WalletState::default()
        }
    }
}
