//! Runtime lifecycle: wires the components and runs until shutdown.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::bootstrap::{build_notifier, build_protocol, build_store, build_transport};
use crate::adapter::outbound::notifier::HtmlFormatter;
use crate::application::session::Pipeline;
use crate::application::{DeliveryQueue, DiffEngine, Session};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Main application entry point.
pub struct App;

impl App {
    /// Run the monitor until the process is stopped.
    ///
    /// # Errors
    ///
    /// Returns an error only for startup problems; stream and delivery
    /// failures are retried or logged.
    pub async fn run(config: Config) -> Result<()> {
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        Self::run_with_shutdown(config, shutdown_rx).await
    }

    /// Run with externally controlled shutdown signal.
    ///
    /// # Errors
    ///
    /// Returns an error only for startup problems.
    pub async fn run_with_shutdown(config: Config, shutdown: watch::Receiver<bool>) -> Result<()> {
        let wallets = config.wallet_ids();
        info!(
            wallets = wallets.len(),
            positions = config.stream.subscribe_positions,
            dry_run = config.dry_run,
            "Starting fillwatch"
        );

        let notifier = build_notifier(&config)?;
        let engine = DiffEngine::hydrate(build_store(&config), &wallets);

        let (queue, delivery) =
            DeliveryQueue::spawn(notifier, config.delivery.spacing(), shutdown.clone());

        let formatter = HtmlFormatter::new();
        if config.telegram.notify_startup {
            queue.enqueue(formatter.startup_notice(&wallets));
        }

        let pipeline = Pipeline {
            engine,
            formatter: Arc::new(formatter),
            queue,
        };
        let mut session = Session::new(
            build_transport(&config),
            Arc::new(build_protocol(&config)),
            pipeline,
            wallets,
            config.stream.session_policy(),
        );

        session.run(shutdown).await;
        drop(session);

        match delivery.await {
            Ok(stats) => info!(
                delivered = stats.delivered,
                failed = stats.failed,
                "fillwatch stopped"
            ),
            Err(e) => warn!(error = %e, "Delivery task ended abnormally"),
        }
        Ok(())
    }
}
