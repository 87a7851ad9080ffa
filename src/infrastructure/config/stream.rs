//! Venue stream and reconnection configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::adapter::outbound::hyperliquid::DEFAULT_WS_URL;
use crate::application::SessionPolicy;

/// `[stream]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamConfig {
    /// WebSocket endpoint.
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    /// Also subscribe to the position-bearing stream.
    #[serde(default)]
    pub subscribe_positions: bool,
    /// Pause after each subscription request (milliseconds).
    #[serde(default = "default_subscribe_delay_ms")]
    pub subscribe_delay_ms: u64,
    /// Delay before reconnecting after a clean close (milliseconds).
    #[serde(default = "default_closed_backoff_ms")]
    pub closed_backoff_ms: u64,
    /// Delay before reconnecting after an error (milliseconds).
    #[serde(default = "default_error_backoff_ms")]
    pub error_backoff_ms: u64,
    /// Heartbeat interval while streaming (seconds).
    #[serde(default = "default_ping_interval_secs")]
    pub ping_interval_secs: u64,
}

fn default_ws_url() -> String {
    DEFAULT_WS_URL.to_string()
}

const fn default_subscribe_delay_ms() -> u64 {
    250
}

const fn default_closed_backoff_ms() -> u64 {
    5_000
}

const fn default_error_backoff_ms() -> u64 {
    10_000
}

const fn default_ping_interval_secs() -> u64 {
    20
}

impl StreamConfig {
    #[must_use]
    pub fn session_policy(&self) -> SessionPolicy {
        SessionPolicy {
            subscribe_delay: Duration::from_millis(self.subscribe_delay_ms),
            closed_backoff: Duration::from_millis(self.closed_backoff_ms),
            error_backoff: Duration::from_millis(self.error_backoff_ms),
        }
    }

    #[must_use]
    pub const fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.ping_interval_secs)
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            ws_url: default_ws_url(),
            subscribe_positions: false,
            subscribe_delay_ms: default_subscribe_delay_ms(),
            closed_backoff_ms: default_closed_backoff_ms(),
            error_backoff_ms: default_error_backoff_ms(),
            ping_interval_secs: default_ping_interval_secs(),
        }
    }
}
