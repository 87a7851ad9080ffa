//! Telegram notification configuration.

use serde::Deserialize;

#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::TelegramConfig;

const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// `[telegram]` section.
///
/// The bot token and chat id are secrets and only ever come from the
/// environment (`TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID`).
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramAppConfig {
    /// Enable telegram notifications.
    #[serde(default)]
    pub enabled: bool,
    /// Announce startup with the list of monitored wallets.
    #[serde(default)]
    pub notify_startup: bool,
    #[serde(default = "default_parse_mode")]
    pub parse_mode: String,
    /// Bot API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(skip)]
    pub bot_token: Option<String>,
    #[serde(skip)]
    pub chat_id: Option<String>,
}

fn default_parse_mode() -> String {
    "HTML".to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl TelegramAppConfig {
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }

    /// Transport settings, if both secrets are present.
    #[cfg(feature = "telegram")]
    #[must_use]
    pub fn credentials(&self) -> Option<TelegramConfig> {
        Some(TelegramConfig {
            bot_token: self.bot_token.clone()?,
            chat_id: self.chat_id.clone()?,
            parse_mode: self.parse_mode.clone(),
            api_url: self.api_url.clone(),
        })
    }
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            notify_startup: false,
            parse_mode: default_parse_mode(),
            api_url: default_api_url(),
            bot_token: None,
            chat_id: None,
        }
    }
}
