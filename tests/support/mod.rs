#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use fillwatch::adapter::outbound::hyperliquid::HyperliquidProtocol;
use fillwatch::adapter::outbound::notifier::HtmlFormatter;
use fillwatch::application::{
    DeliveryQueue, DeliveryStats, DiffEngine, Pipeline, Session, SessionPolicy,
};
use fillwatch::domain::WalletId;
use fillwatch::port::SnapshotStore;
use fillwatch::testkit::notifier::RecordingNotifier;
use fillwatch::testkit::transport::ScriptedTransport;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Write `contents` to `config.toml` inside `dir`.
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

pub fn fast_policy() -> SessionPolicy {
    SessionPolicy {
        subscribe_delay: Duration::from_millis(1),
        closed_backoff: Duration::from_millis(5),
        error_backoff: Duration::from_millis(10),
    }
}

/// A session wired with the production formatter and protocol.
pub struct Harness {
    pub session: Session<ScriptedTransport>,
    pub notifier: RecordingNotifier,
    pub delivery: JoinHandle<DeliveryStats>,
    pub shutdown: watch::Sender<bool>,
}

pub fn harness(
    transport: ScriptedTransport,
    store: Arc<dyn SnapshotStore>,
    wallets: &[&str],
    positions: bool,
) -> Harness {
    let (shutdown, shutdown_rx) = watch::channel(false);
    let notifier = RecordingNotifier::new();
    let (queue, delivery) = DeliveryQueue::spawn(
        Arc::new(notifier.clone()),
        Duration::from_millis(1),
        shutdown_rx,
    );
    let wallets: Vec<WalletId> = wallets.iter().map(WalletId::new).collect();
    let pipeline = Pipeline {
        engine: DiffEngine::hydrate(store, &wallets),
        formatter: Arc::new(HtmlFormatter::new()),
        queue,
    };
    let session = Session::new(
        transport,
        Arc::new(HyperliquidProtocol::with_positions(positions)),
        pipeline,
        wallets,
        fast_policy(),
    );
    Harness {
        session,
        notifier,
        delivery,
        shutdown,
    }
}

/// Poll until `notifier` has recorded at least `count` attempts.
pub async fn wait_for_attempts(notifier: &RecordingNotifier, count: usize) {
    for _ in 0..400 {
        if notifier.attempts().len() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!(
        "expected {count} notifications, got {}",
        notifier.attempts().len()
    );
}
