//! Session manager: keeps the venue subscription alive and feeds inbound
//! frames to the diff engine.
//!
//! # State machine
//!
//! ```text
//! Disconnected ─► Connecting ─► Subscribing ─► Streaming
//!      ▲              │              │             │
//!      └──── backoff ─┴──────────────┴─────────────┘
//!
//! any state ─(shutdown)─► Stopped
//! ```
//!
//! A clean close waits [`SessionPolicy::closed_backoff`] before
//! reconnecting, any other failure waits [`SessionPolicy::error_backoff`].
//! Retries are unbounded. Every connection re-issues all subscriptions.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info, trace, warn};

use super::delivery::DeliveryQueue;
use super::diff::DiffEngine;
use super::wait_for_shutdown;
use crate::domain::{DomainEvent, WalletId};
use crate::error::Result;
use crate::port::{EventFormatter, StreamMessage, StreamProtocol, StreamTransport};

/// Connection lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Subscribing,
    Streaming,
    /// Terminal, entered only on shutdown.
    Stopped,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Subscribing => "subscribing",
            Self::Streaming => "streaming",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Timing knobs of the session loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Pause after each subscription request.
    pub subscribe_delay: Duration,
    /// Wait before reconnecting after the remote closed cleanly.
    pub closed_backoff: Duration,
    /// Wait before reconnecting after any other failure.
    pub error_backoff: Duration,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            subscribe_delay: Duration::from_millis(250),
            closed_backoff: Duration::from_secs(5),
            error_backoff: Duration::from_secs(10),
        }
    }
}

/// Collaborators that turn decoded payloads into queued notifications.
pub struct Pipeline {
    pub engine: DiffEngine,
    pub formatter: Arc<dyn EventFormatter>,
    pub queue: DeliveryQueue,
}

/// Drives one transport for a fixed set of wallets.
pub struct Session<T: StreamTransport> {
    transport: T,
    protocol: Arc<dyn StreamProtocol>,
    pipeline: Pipeline,
    wallets: Vec<WalletId>,
    monitored: HashSet<WalletId>,
    policy: SessionPolicy,
    state: watch::Sender<SessionState>,
}

impl<T: StreamTransport> Session<T> {
    pub fn new(
        transport: T,
        protocol: Arc<dyn StreamProtocol>,
        pipeline: Pipeline,
        wallets: Vec<WalletId>,
        policy: SessionPolicy,
    ) -> Self {
        let monitored = wallets.iter().cloned().collect();
        let (state, _) = watch::channel(SessionState::Disconnected);
        Self {
            transport,
            protocol,
            pipeline,
            wallets,
            monitored,
            policy,
            state,
        }
    }

    /// Subscribe to state transitions.
    #[must_use]
    pub fn watch_state(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    #[must_use]
    pub fn engine(&self) -> &DiffEngine {
        &self.pipeline.engine
    }

    /// Run until shutdown is signalled.
    ///
    /// Transport failures never end the loop; they only schedule a
    /// reconnect.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            transport = self.transport.name(),
            wallets = self.wallets.len(),
            "Session started"
        );

        loop {
            let outcome = tokio::select! {
                biased;
                () = wait_for_shutdown(&mut shutdown) => break,
                outcome = self.connect_and_stream() => outcome,
            };

            self.set_state(SessionState::Disconnected);
            if let Err(e) = self.transport.close().await {
                debug!(error = %e, "Transport close failed");
            }

            let backoff = match outcome {
                Ok(()) => {
                    info!(
                        backoff_ms = self.policy.closed_backoff.as_millis() as u64,
                        "Connection closed by remote, reconnecting"
                    );
                    self.policy.closed_backoff
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        backoff_ms = self.policy.error_backoff.as_millis() as u64,
                        "Connection failed, reconnecting"
                    );
                    self.policy.error_backoff
                }
            };

            tokio::select! {
                biased;
                () = wait_for_shutdown(&mut shutdown) => break,
                () = sleep(backoff) => {}
            }
        }

        if let Err(e) = self.transport.close().await {
            debug!(error = %e, "Transport close failed");
        }
        self.set_state(SessionState::Stopped);
        info!("Session stopped");
    }

    /// One connection attempt. `Ok(())` means the remote closed cleanly.
    async fn connect_and_stream(&mut self) -> Result<()> {
        self.set_state(SessionState::Connecting);
        self.transport.connect().await?;

        self.set_state(SessionState::Subscribing);
        for wallet in &self.wallets {
            for frame in self.protocol.subscriptions(wallet)? {
                self.transport.send(frame).await?;
                sleep(self.policy.subscribe_delay).await;
            }
            info!(wallet = %wallet, "Subscribed");
        }

        self.set_state(SessionState::Streaming);
        while let Some(frame) = self.transport.recv().await? {
            self.handle_frame(&frame);
        }
        Ok(())
    }

    /// Decode one frame, reconcile it and queue the rendered events.
    ///
    /// Returns the events produced, which is empty for undecodable frames,
    /// ignored channels and wallets outside the monitored set.
    pub fn handle_frame(&mut self, frame: &str) -> Vec<DomainEvent> {
        let message = match self.protocol.decode(frame) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, bytes = frame.len(), "Dropping undecodable frame");
                return Vec::new();
            }
        };

        let events = match message {
            StreamMessage::Fills { wallet, fills } => {
                if !self.is_monitored(&wallet) {
                    return Vec::new();
                }
                // An empty payload still runs the engine so an unflushed
                // table gets another save attempt.
                self.pipeline.engine.reconcile_fills(&wallet, fills)
            }
            StreamMessage::Positions { wallet, positions } => {
                if !self.is_monitored(&wallet) {
                    return Vec::new();
                }
                let Some(positions) = positions else {
                    trace!(wallet = %wallet, "Position frame without position data");
                    return Vec::new();
                };
                self.pipeline.engine.reconcile_positions(&wallet, positions)
            }
            StreamMessage::Ignored { channel } => {
                trace!(channel = %channel, "Ignoring frame");
                return Vec::new();
            }
        };

        for event in &events {
            debug!(wallet = %event.wallet(), event = %event, "Queueing notification");
            self.pipeline
                .queue
                .enqueue(self.pipeline.formatter.render(event));
        }
        events
    }

    fn is_monitored(&self, wallet: &WalletId) -> bool {
        let known = self.monitored.contains(wallet);
        if !known {
            debug!(wallet = %wallet, "Ignoring frame for unmonitored wallet");
        }
        known
    }

    fn set_state(&self, next: SessionState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            debug!(from = %previous, to = %next, "Session state changed");
        }
    }
}
