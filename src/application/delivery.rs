//! Rate-limited, order-preserving delivery of notification text.
//!
//! Producers push rendered text with [`DeliveryQueue::enqueue`], which never
//! blocks and never fails. A single consumer task pops items in FIFO order,
//! hands each to the [`Notifier`], and then sleeps for the configured
//! spacing whether the attempt succeeded or not. Failed items are logged
//! and dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::wait_for_shutdown;
use crate::port::Notifier;

/// Counters reported by the consumer when it stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    pub delivered: u64,
    pub failed: u64,
}

/// Producer handle of the delivery queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct DeliveryQueue {
    sender: mpsc::UnboundedSender<String>,
}

impl DeliveryQueue {
    /// Spawn the consumer task and return the producer handle.
    ///
    /// The consumer stops when shutdown is signalled (pending items are
    /// discarded) or when every producer handle has been dropped and the
    /// queue is drained.
    pub fn spawn(
        notifier: Arc<dyn Notifier>,
        spacing: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> (Self, JoinHandle<DeliveryStats>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_consumer(notifier, spacing, receiver, shutdown));
        (Self { sender }, handle)
    }

    /// Queue a message for delivery.
    pub fn enqueue(&self, text: impl Into<String>) {
        if self.sender.send(text.into()).is_err() {
            warn!("Delivery queue closed, dropping notification");
        }
    }
}

async fn run_consumer(
    notifier: Arc<dyn Notifier>,
    spacing: Duration,
    mut receiver: mpsc::UnboundedReceiver<String>,
    mut shutdown: watch::Receiver<bool>,
) -> DeliveryStats {
    let mut stats = DeliveryStats::default();
    info!(
        notifier = notifier.name(),
        spacing_ms = spacing.as_millis() as u64,
        "Delivery queue started"
    );

    loop {
        let text = tokio::select! {
            biased;
            () = wait_for_shutdown(&mut shutdown) => break,
            item = receiver.recv() => match item {
                Some(text) => text,
                None => break,
            },
        };

        match notifier.deliver(&text).await {
            Ok(()) => {
                stats.delivered += 1;
                debug!(notifier = notifier.name(), "Notification delivered");
            }
            Err(e) => {
                stats.failed += 1;
                warn!(
                    notifier = notifier.name(),
                    error = %e,
                    "Notification delivery failed, dropping message"
                );
            }
        }

        tokio::select! {
            biased;
            () = wait_for_shutdown(&mut shutdown) => break,
            () = sleep(spacing) => {}
        }
    }

    info!(
        delivered = stats.delivered,
        failed = stats.failed,
        "Delivery queue stopped"
    );
    stats
}
