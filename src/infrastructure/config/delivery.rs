//! Notification delivery configuration.

use std::time::Duration;

use serde::Deserialize;

/// `[delivery]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryConfig {
    /// Minimum gap between two delivery attempts (milliseconds).
    #[serde(default = "default_spacing_ms")]
    pub spacing_ms: u64,
}

const fn default_spacing_ms() -> u64 {
    3_000
}

impl DeliveryConfig {
    #[must_use]
    pub const fn spacing(&self) -> Duration {
        Duration::from_millis(self.spacing_ms)
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            spacing_ms: default_spacing_ms(),
        }
    }
}
