//! Telegram Bot API transport.
//!
//! Requires the `telegram` feature to be enabled.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::port::Notifier;

/// Default Bot API base URL.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Credentials and endpoint for the Telegram transport.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
    /// Target chat: numeric id or `@channel` name.
    pub chat_id: String,
    /// Value of the `parse_mode` field, usually `HTML`.
    pub parse_mode: String,
    pub api_url: String,
}

impl TelegramConfig {
    /// Read credentials from `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`.
    ///
    /// Returns `None` if either variable is missing or blank.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let bot_token = non_blank_env("TELEGRAM_BOT_TOKEN")?;
        let chat_id = non_blank_env("TELEGRAM_CHAT_ID")?;
        Some(Self {
            bot_token,
            chat_id,
            parse_mode: "HTML".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        })
    }

    #[must_use]
    pub fn with_parse_mode(mut self, parse_mode: impl Into<String>) -> Self {
        self.parse_mode = parse_mode.into();
        self
    }

    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_url.trim_end_matches('/'),
            self.bot_token
        )
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Sends each message with one `sendMessage` call.
pub struct TelegramNotifier {
    client: reqwest::Client,
    endpoint: String,
    config: TelegramConfig,
}

impl TelegramNotifier {
    /// Build the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: config.send_message_url(),
            config,
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn deliver(&self, text: &str) -> Result<()> {
        let body = SendMessage {
            chat_id: &self.config.chat_id,
            text,
            parse_mode: &self.config.parse_mode,
        };
        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        if status.is_success() {
            debug!(status = %status, "Telegram message sent");
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();
        warn!(status = %status, body = %detail, "Telegram API rejected message");
        Err(Error::Notification(format!(
            "Telegram API returned {status}: {detail}"
        )))
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}
