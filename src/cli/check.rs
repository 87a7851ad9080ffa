//! Configuration, connection and Telegram diagnostic commands.

use std::path::Path;
use std::time::Duration;

use crate::adapter::outbound::hyperliquid::HyperliquidTransport;
use crate::cli::output;
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::StreamTransport;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Validate configuration file without starting the monitor.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    output::section(&format!("Checking configuration: {}", path.display()));

    let config = Config::load(path)?;
    output::ok("Configuration file is valid");

    output::wallets(&config.wallet_ids());
    output::key_value("WebSocket", &config.stream.ws_url);
    output::key_value("Positions", config.stream.subscribe_positions);
    output::key_value("Spacing", format!("{} ms", config.delivery.spacing_ms));
    output::key_value("State dir", config.store.dir.display());
    output::key_value("Dry-run", config.dry_run);

    if config.telegram.enabled {
        if config.telegram.has_credentials() {
            output::ok("Telegram configured and enabled");
        } else {
            output::warn("Telegram enabled but TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID is not set");
        }
    } else {
        output::key_value("Telegram", "disabled");
    }

    Ok(())
}

/// Open the venue websocket once and close it again.
pub async fn execute_connection<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config = Config::load(config_path)?;
    output::section("Connection Check");
    output::key_value("WebSocket", &config.stream.ws_url);

    let mut transport =
        HyperliquidTransport::new(config.stream.ws_url.clone(), config.stream.ping_interval());
    output::step("Connecting", async {
        match tokio::time::timeout(CONNECT_TIMEOUT, transport.connect()).await {
            Ok(result) => result,
            Err(_) => Err(Error::Connection(format!(
                "timed out after {}s",
                CONNECT_TIMEOUT.as_secs()
            ))),
        }
    })
    .await?;
    transport.close().await?;
    output::ok("WebSocket reachable");
    Ok(())
}

/// Send a Telegram test message using the configured credentials.
#[cfg(feature = "telegram")]
pub async fn execute_telegram<P: AsRef<Path>>(config_path: P) -> Result<()> {
    use crate::adapter::outbound::notifier::TelegramNotifier;
    use crate::error::ConfigError;
    use crate::infrastructure::config::settings::BOT_TOKEN_ENV;
    use crate::port::Notifier;

    let config = Config::load(config_path)?;
    let credentials = config
        .telegram
        .credentials()
        .ok_or(ConfigError::MissingField {
            field: BOT_TOKEN_ENV,
        })?;

    output::section("Telegram Check");
    output::secret("Bot token", &credentials.bot_token);
    output::key_value("Chat ID", &credentials.chat_id);

    let message = format!(
        "🧪 <b>fillwatch test message</b>\n\nConfiguration validated.\nWallets: <code>{}</code>",
        config.wallet_ids().len()
    );
    let notifier = TelegramNotifier::new(credentials)?;
    output::step("Sending test message", notifier.deliver(&message)).await?;
    output::ok("Check Telegram for the message");
    Ok(())
}

/// Send a Telegram test message (non-telegram variant).
#[cfg(not(feature = "telegram"))]
pub async fn execute_telegram<P: AsRef<Path>>(_config_path: P) -> Result<()> {
    Err(Error::Notification(
        "built without the telegram feature".to_string(),
    ))
}
