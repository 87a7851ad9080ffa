//! Hyperliquid info-stream integration.

pub mod message;
pub mod protocol;
pub mod stream;

pub use message::SubscriptionKind;
pub use protocol::HyperliquidProtocol;
pub use stream::HyperliquidTransport;

/// Public websocket endpoint.
pub const DEFAULT_WS_URL: &str = "wss://api.hyperliquid.xyz/ws";
