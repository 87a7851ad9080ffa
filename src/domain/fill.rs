//! Executed trades (fills).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::FillKey;
use super::num;

/// Seen-fills table of one wallet, keyed by `(coin, tid)`.
pub type FillTable = BTreeMap<FillKey, Fill>;

/// A completed trade execution. Immutable once observed.
///
/// Field names on the wire and on disk follow the venue (`tid`, `px`, `sz`,
/// `dir`, `time`, ...), so persisted tables stay readable by anything that
/// speaks the venue format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    pub coin: String,
    #[serde(rename = "tid")]
    pub trade_id: u64,
    /// `"B"` for a buy, `"A"` for a sell.
    #[serde(default, deserialize_with = "num::text")]
    pub side: String,
    /// Human direction, e.g. `"Open Long"` or `"Close Short"`.
    #[serde(rename = "dir", default, deserialize_with = "num::text")]
    pub direction: String,
    #[serde(rename = "px", default, deserialize_with = "num::text")]
    pub price: String,
    #[serde(rename = "sz", default, deserialize_with = "num::text")]
    pub size: String,
    #[serde(default, deserialize_with = "num::text")]
    pub start_position: String,
    /// Milliseconds since the Unix epoch.
    #[serde(rename = "time", default)]
    pub timestamp: i64,
    #[serde(default, deserialize_with = "num::text")]
    pub closed_pnl: String,
    #[serde(default)]
    pub crossed: bool,
}

impl Fill {
    #[must_use]
    pub fn key(&self) -> FillKey {
        FillKey::new(self.coin.clone(), self.trade_id)
    }

    /// Whether this fill opened (or added to) a position.
    #[must_use]
    pub fn is_opening(&self) -> bool {
        self.direction.contains("Open")
    }
}
