//! Builders for domain primitives and venue frames used across tests.

use serde_json::json;

use crate::domain::{Fill, PositionSnapshot, RawLeverage, RawPosition, Side};

/// An opening buy of one unit at 100.
pub fn fill(coin: &str, tid: u64, time: i64) -> Fill {
    Fill {
        coin: coin.to_string(),
        trade_id: tid,
        side: "B".to_string(),
        direction: "Open Long".to_string(),
        price: "100".to_string(),
        size: "1".to_string(),
        start_position: "0".to_string(),
        timestamp: time,
        closed_pnl: "0".to_string(),
        crossed: true,
    }
}

/// A raw position whose side follows from `entry` vs `liquidation`.
pub fn position(coin: &str, entry: &str, liquidation: &str) -> RawPosition {
    RawPosition {
        coin: Some(coin.to_string()),
        szi: "1".to_string(),
        entry_px: Some(entry.to_string()),
        liquidation_px: Some(liquidation.to_string()),
        unrealized_pnl: "0".to_string(),
        leverage: Some(RawLeverage {
            kind: "cross".to_string(),
            value: "20".to_string(),
        }),
    }
}

/// A keyed snapshot with 20x cross leverage and a small profit.
pub fn snapshot(coin: &str, side: Side) -> PositionSnapshot {
    PositionSnapshot {
        coin: coin.to_string(),
        side,
        size: "1500.25".to_string(),
        entry_price: "100".to_string(),
        unrealized_pnl: "12.5".to_string(),
        leverage_value: "20".to_string(),
        leverage_type: "cross".to_string(),
    }
}

/// A `userFills` frame carrying `(coin, tid, time)` fills.
pub fn fills_frame(user: &str, fills: &[(&str, u64, i64)]) -> String {
    let fills: Vec<_> = fills
        .iter()
        .map(|(coin, tid, time)| {
            json!({
                "coin": coin,
                "px": "100.0",
                "sz": "1.0",
                "side": "B",
                "time": time,
                "startPosition": "0.0",
                "dir": "Open Long",
                "closedPnl": "0.0",
                "hash": "0x0",
                "oid": 1,
                "crossed": true,
                "fee": "0.01",
                "tid": tid
            })
        })
        .collect();
    json!({"channel": "userFills", "data": {"user": user, "fills": fills}}).to_string()
}

/// A `webData2` frame with `(coin, entryPx, liquidationPx)` positions.
///
/// `None` omits `assetPositions` entirely.
pub fn positions_frame(user: &str, positions: Option<&[(&str, &str, &str)]>) -> String {
    let state = match positions {
        Some(positions) => {
            let entries: Vec<_> = positions
                .iter()
                .map(|(coin, entry, liquidation)| {
                    json!({
                        "type": "oneWay",
                        "position": {
                            "coin": coin,
                            "szi": "1.0",
                            "entryPx": entry,
                            "liquidationPx": liquidation,
                            "unrealizedPnl": "0.0",
                            "leverage": {"type": "cross", "value": 20}
                        }
                    })
                })
                .collect();
            json!({"assetPositions": entries})
        }
        None => json!({"marginSummary": {}}),
    };
    json!({"channel": "webData2", "data": {"user": user, "clearinghouseState": state}}).to_string()
}
