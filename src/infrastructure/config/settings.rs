//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for the wallet list and the Telegram secrets.
//!
//! # Example
//!
//! ```no_run
//! use fillwatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::delivery::DeliveryConfig;
use super::logging::LoggingConfig;
use super::store::StoreConfig;
use super::stream::StreamConfig;
use super::telegram::TelegramAppConfig;
use crate::domain::WalletId;
use crate::error::{ConfigError, Result};

/// Comma separated wallet list replacing `wallets` from the file.
pub const WALLETS_ENV: &str = "FILLWATCH_WALLETS";
pub const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
pub const CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Wallet addresses to monitor.
    #[serde(default)]
    pub wallets: Vec<String>,

    /// Venue stream and reconnection settings.
    #[serde(default)]
    pub stream: StreamConfig,

    /// Notification pacing.
    #[serde(default)]
    pub delivery: DeliveryConfig,

    /// Seen-fills persistence.
    #[serde(default)]
    pub store: StoreConfig,

    /// Telegram notification configuration.
    #[serde(default)]
    pub telegram: TelegramAppConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Log notifications instead of sending them.
    #[serde(default)]
    pub dry_run: bool,
}

impl Config {
    /// Parse and validate configuration from TOML content, applying
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config = Self::parse_unvalidated(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a file and apply environment overrides without validating, so
    /// command-line overrides can be applied before [`Config::validate`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[allow(clippy::result_large_err)]
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_unvalidated(&content)
    }

    fn parse_unvalidated(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides through `lookup`.
    ///
    /// Secrets are never read from the file; blank values count as unset.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(list) = lookup(WALLETS_ENV) {
            self.wallets = list
                .split(',')
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect();
        }
        self.telegram.bot_token = lookup(BOT_TOKEN_ENV);
        self.telegram.chat_id = lookup(CHAT_ID_ENV);
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] or [`ConfigError::InvalidValue`]
    /// naming the first offending field.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.wallets.is_empty() {
            return Err(ConfigError::MissingField { field: "wallets" }.into());
        }
        if self.wallets.iter().any(|w| w.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "wallets",
                reason: "must not contain empty addresses".to_string(),
            }
            .into());
        }

        if self.stream.ws_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "ws_url" }.into());
        }
        match Url::parse(&self.stream.ws_url) {
            Ok(url) if matches!(url.scheme(), "ws" | "wss") => {}
            Ok(url) => {
                return Err(ConfigError::InvalidValue {
                    field: "ws_url",
                    reason: format!("unsupported scheme {}", url.scheme()),
                }
                .into());
            }
            Err(e) => {
                return Err(ConfigError::InvalidValue {
                    field: "ws_url",
                    reason: e.to_string(),
                }
                .into());
            }
        }

        if self.stream.closed_backoff_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "closed_backoff_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.stream.error_backoff_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "error_backoff_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.stream.ping_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ping_interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.telegram.enabled {
            if let Err(e) = Url::parse(&self.telegram.api_url) {
                return Err(ConfigError::InvalidValue {
                    field: "api_url",
                    reason: e.to_string(),
                }
                .into());
            }
            if !self.dry_run {
                if self.telegram.bot_token.is_none() {
                    return Err(ConfigError::MissingField {
                        field: BOT_TOKEN_ENV,
                    }
                    .into());
                }
                if self.telegram.chat_id.is_none() {
                    return Err(ConfigError::MissingField { field: CHAT_ID_ENV }.into());
                }
            }
        }

        Ok(())
    }

    /// Monitored wallets, normalized, duplicates removed, file order kept.
    #[must_use]
    pub fn wallet_ids(&self) -> Vec<WalletId> {
        let mut ids: Vec<WalletId> = Vec::with_capacity(self.wallets.len());
        for wallet in &self.wallets {
            let id = WalletId::new(wallet);
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;

    fn parse(content: &str, env: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(|key| env.get(key).cloned());
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = parse(r#"wallets = ["0xABC"]"#, &[]).unwrap();

        assert_eq!(config.stream.ws_url, "wss://api.hyperliquid.xyz/ws");
        assert!(!config.stream.subscribe_positions);
        assert_eq!(config.stream.subscribe_delay_ms, 250);
        assert_eq!(config.stream.closed_backoff_ms, 5_000);
        assert_eq!(config.stream.error_backoff_ms, 10_000);
        assert_eq!(config.delivery.spacing_ms, 3_000);
        assert_eq!(config.store.dir.to_str(), Some("state"));
        assert_eq!(config.telegram.parse_mode, "HTML");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.wallet_ids(), vec![WalletId::new("0xabc")]);
    }

    #[test]
    fn missing_wallets_rejected() {
        let result = parse("", &[]);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "wallets" }))
        ));
    }

    #[test]
    fn blank_wallet_rejected() {
        let result = parse(r#"wallets = ["0xabc", "  "]"#, &[]);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "wallets", .. }))
        ));
    }

    #[test]
    fn env_wallets_replace_file_wallets() {
        let config = parse(
            r#"wallets = ["0xfile"]"#,
            &[(WALLETS_ENV, " 0xA, ,0xB,0xa ")],
        )
        .unwrap();
        assert_eq!(
            config.wallet_ids(),
            vec![WalletId::new("0xa"), WalletId::new("0xb")]
        );
    }

    #[test]
    fn invalid_ws_url_rejected() {
        let result = parse(
            r#"
            wallets = ["0xabc"]
            [stream]
            ws_url = "https://example.com"
            "#,
            &[],
        );
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "ws_url", .. }))
        ));
    }

    #[test]
    fn zero_backoff_rejected() {
        let result = parse(
            r#"
            wallets = ["0xabc"]
            [stream]
            error_backoff_ms = 0
            "#,
            &[],
        );
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "error_backoff_ms",
                ..
            }))
        ));
    }

    #[test]
    fn telegram_requires_secrets_unless_dry_run() {
        let content = r#"
            wallets = ["0xabc"]
            [telegram]
            enabled = true
        "#;
        assert!(matches!(
            parse(content, &[]),
            Err(Error::Config(ConfigError::MissingField {
                field: "TELEGRAM_BOT_TOKEN"
            }))
        ));
        assert!(matches!(
            parse(content, &[(BOT_TOKEN_ENV, "t")]),
            Err(Error::Config(ConfigError::MissingField {
                field: "TELEGRAM_CHAT_ID"
            }))
        ));

        let config = parse(content, &[(BOT_TOKEN_ENV, "t"), (CHAT_ID_ENV, "-100")]).unwrap();
        assert!(config.telegram.has_credentials());

        let dry = format!("dry_run = true\n{content}");
        assert!(parse(&dry, &[]).is_ok());
    }

    #[test]
    fn secrets_are_not_read_from_file() {
        let result = parse(
            r#"
            wallets = ["0xabc"]
            [telegram]
            enabled = true
            bot_token = "in-file"
            "#,
            &[(CHAT_ID_ENV, "1")],
        );
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField {
                field: "TELEGRAM_BOT_TOKEN"
            }))
        ));
    }
}
