//! Notifier port for outbound notification text.

use async_trait::async_trait;

use crate::error::Result;

/// Delivers rendered notification text to a channel.
///
/// A call either succeeds or fails as a whole; the delivery queue never
/// retries a failed call.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message.
    async fn deliver(&self, text: &str) -> Result<()>;

    /// Notifier name for logging.
    fn name(&self) -> &'static str;
}
