//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::hyperliquid::{HyperliquidProtocol, HyperliquidTransport};
use crate::adapter::outbound::notifier::LogNotifier;
#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::TelegramNotifier;
use crate::adapter::outbound::store::JsonFileStore;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{Notifier, SnapshotStore};

/// Build the notification transport.
///
/// Dry runs and disabled Telegram both log instead of sending.
///
/// # Errors
///
/// Returns a configuration error when Telegram is enabled without
/// credentials, or an HTTP error if the client cannot be built.
#[cfg(feature = "telegram")]
pub(crate) fn build_notifier(config: &Config) -> Result<Arc<dyn Notifier>> {
    use crate::error::ConfigError;
    use crate::infrastructure::config::settings::BOT_TOKEN_ENV;

    if config.dry_run {
        info!("Dry-run mode enabled, notifications will be logged");
        return Ok(Arc::new(LogNotifier));
    }
    if !config.telegram.enabled {
        info!("Telegram disabled, notifications will be logged");
        return Ok(Arc::new(LogNotifier));
    }

    let credentials = config
        .telegram
        .credentials()
        .ok_or(ConfigError::MissingField {
            field: BOT_TOKEN_ENV,
        })?;
    let notifier = TelegramNotifier::new(credentials)?;
    info!("Telegram notifier enabled");
    Ok(Arc::new(notifier))
}

/// Build the notification transport (non-telegram variant).
#[cfg(not(feature = "telegram"))]
pub(crate) fn build_notifier(config: &Config) -> Result<Arc<dyn Notifier>> {
    if config.telegram.enabled && !config.dry_run {
        tracing::warn!("Telegram enabled but the telegram feature is not compiled in");
    }
    info!("Notifications will be logged");
    Ok(Arc::new(LogNotifier))
}

pub(crate) fn build_store(config: &Config) -> Arc<dyn SnapshotStore> {
    info!(dir = %config.store.dir.display(), "Using JSON file store");
    Arc::new(JsonFileStore::new(config.store.dir.clone()))
}

pub(crate) fn build_protocol(config: &Config) -> HyperliquidProtocol {
    HyperliquidProtocol::with_positions(config.stream.subscribe_positions)
}

pub(crate) fn build_transport(config: &Config) -> HyperliquidTransport {
    HyperliquidTransport::new(config.stream.ws_url.clone(), config.stream.ping_interval())
}
