//! Notifier that writes messages to the log instead of sending them.

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::port::Notifier;

/// Dry-run notifier. Every delivery succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn deliver(&self, text: &str) -> Result<()> {
        info!(text = %text, "Notification (dry run)");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
