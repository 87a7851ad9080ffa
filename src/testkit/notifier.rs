//! Recording [`Notifier`] for delivery assertions.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::port::Notifier;

/// Records every delivery attempt with the time it started.
///
/// Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    attempts: Arc<Mutex<Vec<(String, Instant)>>>,
    fail_on: Option<String>,
    latency: Duration,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every delivery of exactly `text`.
    pub fn failing_on(mut self, text: &str) -> Self {
        self.fail_on = Some(text.to_string());
        self
    }

    /// Sleep for `latency` inside every delivery.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Texts of all attempts, successful or not, in order.
    pub fn texts(&self) -> Vec<String> {
        self.attempts()
            .into_iter()
            .map(|(text, _)| text)
            .collect()
    }

    pub fn attempts(&self) -> Vec<(String, Instant)> {
        self.attempts.lock().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn deliver(&self, text: &str) -> Result<()> {
        self.attempts
            .lock()
            .push((text.to_string(), Instant::now()));

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.fail_on.as_deref() == Some(text) {
            return Err(Error::Notification(format!("scripted failure for {text}")));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
