//! [`StreamProtocol`] implementation for the Hyperliquid info stream.

use super::message::{decode_frame, SubscribeRequest, SubscriptionKind};
use crate::domain::WalletId;
use crate::error::Result;
use crate::port::{StreamMessage, StreamProtocol};

/// Subscribes each wallet to a fixed list of kinds and decodes frames.
#[derive(Debug, Clone)]
pub struct HyperliquidProtocol {
    kinds: Vec<SubscriptionKind>,
}

impl HyperliquidProtocol {
    #[must_use]
    pub fn new(kinds: Vec<SubscriptionKind>) -> Self {
        Self { kinds }
    }

    /// Fills always; positions only when asked for.
    #[must_use]
    pub fn with_positions(subscribe_positions: bool) -> Self {
        let mut kinds = vec![SubscriptionKind::UserFills];
        if subscribe_positions {
            kinds.push(SubscriptionKind::WebData2);
        }
        Self::new(kinds)
    }

    #[must_use]
    pub fn kinds(&self) -> &[SubscriptionKind] {
        &self.kinds
    }
}

impl StreamProtocol for HyperliquidProtocol {
    fn subscriptions(&self, wallet: &WalletId) -> Result<Vec<String>> {
        self.kinds
            .iter()
            .map(|kind| Ok(serde_json::to_string(&SubscribeRequest::new(*kind, wallet))?))
            .collect()
    }

    fn decode(&self, frame: &str) -> Result<StreamMessage> {
        decode_frame(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_opt_in() {
        assert_eq!(
            HyperliquidProtocol::with_positions(false).kinds(),
            &[SubscriptionKind::UserFills]
        );
        assert_eq!(
            HyperliquidProtocol::with_positions(true).kinds(),
            &[SubscriptionKind::UserFills, SubscriptionKind::WebData2]
        );
    }

    #[test]
    fn one_frame_per_kind_in_order() {
        let protocol = HyperliquidProtocol::with_positions(true);
        let frames = protocol.subscriptions(&WalletId::new("0xabc")).unwrap();
        assert_eq!(frames.len(), 2);
        assert!(frames[0].contains("userFills"));
        assert!(frames[1].contains("webData2"));
    }
}
