//! Open perpetual positions as seen in a wallet's clearinghouse state.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::PositionKey;
use super::num::{self, parse_decimal};

/// Direction of an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Long,
    Short,
}

impl Side {
    /// Infer the side from entry and liquidation prices.
    ///
    /// A short is liquidated above its entry, so `entry < liquidation` means
    /// short. Everything else, including a missing or unparsable price, is
    /// treated as long.
    #[must_use]
    pub fn infer(entry_price: Option<&str>, liquidation_price: Option<&str>) -> Self {
        let entry = entry_price.and_then(parse_decimal);
        let liquidation = liquidation_price.and_then(parse_decimal);
        match (entry, liquidation) {
            (Some(entry), Some(liquidation)) if entry < liquidation => Self::Short,
            _ => Self::Long,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leverage block of a raw position entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawLeverage {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "num::text")]
    pub value: String,
}

/// Position entry as reported by the venue, before it is keyed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPosition {
    #[serde(default)]
    pub coin: Option<String>,
    #[serde(default, deserialize_with = "num::text")]
    pub szi: String,
    #[serde(default, deserialize_with = "num::optional_text")]
    pub entry_px: Option<String>,
    #[serde(default, deserialize_with = "num::optional_text")]
    pub liquidation_px: Option<String>,
    #[serde(default, deserialize_with = "num::text")]
    pub unrealized_pnl: String,
    #[serde(default)]
    pub leverage: Option<RawLeverage>,
}

impl RawPosition {
    /// Key this entry and build its snapshot.
    ///
    /// Returns `None` for entries without a coin.
    #[must_use]
    pub fn into_snapshot(self) -> Option<PositionSnapshot> {
        let coin = self.coin.filter(|c| !c.trim().is_empty())?;
        let side = Side::infer(self.entry_px.as_deref(), self.liquidation_px.as_deref());
        let leverage = self.leverage.unwrap_or_default();
        Some(PositionSnapshot {
            coin,
            side,
            size: self.szi,
            entry_price: self.entry_px.unwrap_or_default(),
            unrealized_pnl: self.unrealized_pnl,
            leverage_value: leverage.value,
            leverage_type: leverage.kind,
        })
    }
}

/// Last-known state of one open position.
///
/// Numeric fields keep the venue's raw decimal text; formatting decides how
/// to present them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub coin: String,
    pub side: Side,
    pub size: String,
    pub entry_price: String,
    pub unrealized_pnl: String,
    pub leverage_value: String,
    pub leverage_type: String,
}

impl PositionSnapshot {
    #[must_use]
    pub fn key(&self) -> PositionKey {
        PositionKey::new(self.coin.clone(), self.side)
    }
}
