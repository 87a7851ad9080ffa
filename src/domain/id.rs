//! Domain identifier types with proper encapsulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::position::Side;

/// Monitored wallet address, case-folded.
///
/// The inner String is private so every instance goes through
/// [`WalletId::new`], which trims and lowercases the address. Two addresses
/// that differ only in case therefore compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct WalletId(String);

impl WalletId {
    /// Create a new `WalletId`, normalizing the address.
    pub fn new(address: impl AsRef<str>) -> Self {
        Self(address.as_ref().trim().to_lowercase())
    }

    /// Get the wallet address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for WalletId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<WalletId> for String {
    fn from(id: WalletId) -> Self {
        id.0
    }
}

/// Identity of a logical open position: instrument plus inferred side.
///
/// Size changes do not change the key, so a position that is scaled in or
/// out stays the same position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey {
    coin: String,
    side: Side,
}

impl PositionKey {
    #[must_use]
    pub fn new(coin: impl Into<String>, side: Side) -> Self {
        Self {
            coin: coin.into(),
            side,
        }
    }

    #[must_use]
    pub fn coin(&self) -> &str {
        &self.coin
    }

    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.coin, self.side)
    }
}

/// Identity of an executed trade within a wallet: `(coin, tid)`.
///
/// Serialized as `"{coin}_{tid}"`, which is also the key format of the
/// persisted fill tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FillKey {
    coin: String,
    trade_id: u64,
}

impl FillKey {
    #[must_use]
    pub fn new(coin: impl Into<String>, trade_id: u64) -> Self {
        Self {
            coin: coin.into(),
            trade_id,
        }
    }

    #[must_use]
    pub fn coin(&self) -> &str {
        &self.coin
    }

    #[must_use]
    pub const fn trade_id(&self) -> u64 {
        self.trade_id
    }
}

impl fmt::Display for FillKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.coin, self.trade_id)
    }
}

/// Error returned when a persisted fill key cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fill key '{0}': expected '<coin>_<tid>'")]
pub struct ParseFillKeyError(String);

impl FromStr for FillKey {
    type Err = ParseFillKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Coins may contain underscores, the trade id never does.
        let (coin, tid) = s
            .rsplit_once('_')
            .ok_or_else(|| ParseFillKeyError(s.to_string()))?;
        if coin.is_empty() {
            return Err(ParseFillKeyError(s.to_string()));
        }
        let trade_id = tid.parse().map_err(|_| ParseFillKeyError(s.to_string()))?;
        Ok(Self::new(coin, trade_id))
    }
}

impl TryFrom<String> for FillKey {
    type Error = ParseFillKeyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FillKey> for String {
    fn from(key: FillKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_id_is_case_folded() {
        let a = WalletId::new("0xABCdef");
        let b = WalletId::new("  0xabcDEF ");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "0xabcdef");
    }

    #[test]
    fn wallet_id_deserializes_normalized() {
        let id: WalletId = serde_json::from_str("\"0xFF\"").unwrap();
        assert_eq!(id.as_str(), "0xff");
    }

    #[test]
    fn position_key_display() {
        let key = PositionKey::new("BTC", Side::Long);
        assert_eq!(key.to_string(), "BTC_long");
        assert_eq!(PositionKey::new("ETH", Side::Short).to_string(), "ETH_short");
    }

    #[test]
    fn fill_key_parses_display_form() {
        let key: FillKey = "ETH_42".parse().unwrap();
        assert_eq!(key, FillKey::new("ETH", 42));
        assert_eq!(key.to_string(), "ETH_42");
    }

    #[test]
    fn fill_key_keeps_underscores_in_coin() {
        let key: FillKey = "@1_PURR_7".parse().unwrap();
        assert_eq!(key.coin(), "@1_PURR");
        assert_eq!(key.trade_id(), 7);
    }

    #[test]
    fn fill_key_rejects_garbage() {
        assert!("ETH".parse::<FillKey>().is_err());
        assert!("ETH_abc".parse::<FillKey>().is_err());
        assert!("_42".parse::<FillKey>().is_err());
    }
}
