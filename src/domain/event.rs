//! Domain events produced by reconciliation.

use std::fmt;

use super::fill::Fill;
use super::id::WalletId;
use super::position::PositionSnapshot;

/// A discrete change detected in a wallet's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainEvent {
    /// A position key appeared that was not present in the previous snapshot.
    PositionOpened {
        wallet: WalletId,
        snapshot: PositionSnapshot,
    },
    /// A position key disappeared. Carries the last-known snapshot.
    PositionClosed {
        wallet: WalletId,
        snapshot: PositionSnapshot,
    },
    /// A fill that had never been seen for this wallet.
    FillObserved { wallet: WalletId, fill: Fill },
}

impl DomainEvent {
    #[must_use]
    pub fn wallet(&self) -> &WalletId {
        match self {
            Self::PositionOpened { wallet, .. }
            | Self::PositionClosed { wallet, .. }
            | Self::FillObserved { wallet, .. } => wallet,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PositionOpened { .. } => "position_opened",
            Self::PositionClosed { .. } => "position_closed",
            Self::FillObserved { .. } => "fill_observed",
        }
    }
}

impl fmt::Display for DomainEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositionOpened { snapshot, .. } | Self::PositionClosed { snapshot, .. } => {
                write!(f, "{} {}", self.kind(), snapshot.key())
            }
            Self::FillObserved { fill, .. } => write!(f, "{} {}", self.kind(), fill.key()),
        }
    }
}
