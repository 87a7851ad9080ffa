//! Venue protocol port.
//!
//! Turns wallets into subscription frames and inbound frames into
//! venue-neutral messages, so the session manager never sees wire JSON.

use crate::domain::{Fill, RawPosition, WalletId};
use crate::error::Result;

/// A decoded inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamMessage {
    /// Recent fills for a wallet. May be empty.
    Fills { wallet: WalletId, fills: Vec<Fill> },
    /// Full position list for a wallet.
    ///
    /// `None` when the frame carried no position data at all, which is not
    /// the same as an empty list (every position closed).
    Positions {
        wallet: WalletId,
        positions: Option<Vec<RawPosition>>,
    },
    /// Acknowledgements, pongs and channels nobody consumes.
    Ignored { channel: String },
}

/// Wire protocol of a venue stream.
pub trait StreamProtocol: Send + Sync {
    /// Subscription frames to send for `wallet`, in order.
    fn subscriptions(&self, wallet: &WalletId) -> Result<Vec<String>>;

    /// Decode one inbound text frame.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Decode`] or a JSON error for frames
    /// that cannot be understood. Callers drop such frames.
    fn decode(&self, frame: &str) -> Result<StreamMessage>;
}
