//! Hyperliquid websocket message types.
//!
//! Every inbound frame is an envelope `{"channel": ..., "data": ...}`.
//! Only two channels carry wallet state:
//!
//! ```json
//! {"channel":"userFills","data":{"user":"0x...","fills":[{"coin":"ETH","tid":42,...}]}}
//! {"channel":"webData2","data":{"user":"0x...","clearinghouseState":{"assetPositions":[{"type":"oneWay","position":{...}}]}}}
//! ```
//!
//! Fills and positions are decoded entry by entry so one malformed entry
//! does not cost the rest of the frame.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::{Fill, RawPosition, WalletId};
use crate::error::{Error, Result};
use crate::port::StreamMessage;

/// Stream a wallet can be subscribed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubscriptionKind {
    /// Executed trades.
    #[serde(rename = "userFills")]
    UserFills,
    /// Aggregate account data, including the clearinghouse positions.
    #[serde(rename = "webData2")]
    WebData2,
}

impl SubscriptionKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UserFills => "userFills",
            Self::WebData2 => "webData2",
        }
    }
}

/// Subscription request sent once per wallet and kind.
#[derive(Debug, Serialize)]
pub struct SubscribeRequest<'a> {
    method: &'static str,
    subscription: Subscription<'a>,
}

#[derive(Debug, Serialize)]
struct Subscription<'a> {
    #[serde(rename = "type")]
    kind: SubscriptionKind,
    user: &'a str,
}

impl<'a> SubscribeRequest<'a> {
    #[must_use]
    pub fn new(kind: SubscriptionKind, wallet: &'a WalletId) -> Self {
        Self {
            method: "subscribe",
            subscription: Subscription {
                kind,
                user: wallet.as_str(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    channel: String,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Deserialize)]
struct FillsData {
    user: String,
    #[serde(default)]
    fills: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebData {
    user: String,
    #[serde(default)]
    clearinghouse_state: Option<ClearinghouseState>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClearinghouseState {
    #[serde(default)]
    asset_positions: Option<Vec<Value>>,
}

/// Decode one inbound text frame.
///
/// # Errors
///
/// Fails when the frame is not JSON, has no `channel`, or a wallet channel
/// lacks its `user`.
pub fn decode_frame(raw: &str) -> Result<StreamMessage> {
    let envelope: Envelope = serde_json::from_str(raw)?;
    match envelope.channel.as_str() {
        "userFills" => {
            let data: FillsData = payload(&envelope)?;
            let wallet = WalletId::new(&data.user);
            let fills = data
                .fills
                .unwrap_or_default()
                .into_iter()
                .filter_map(|value| decode_entry::<Fill>(value, &wallet, "fill"))
                .collect();
            Ok(StreamMessage::Fills { wallet, fills })
        }
        "webData2" => {
            let data: WebData = payload(&envelope)?;
            let wallet = WalletId::new(&data.user);
            let positions = data
                .clearinghouse_state
                .and_then(|state| state.asset_positions)
                .map(|entries| {
                    entries
                        .into_iter()
                        .filter_map(|mut entry| entry.get_mut("position").map(Value::take))
                        .filter_map(|value| decode_entry::<RawPosition>(value, &wallet, "position"))
                        .collect()
                });
            Ok(StreamMessage::Positions { wallet, positions })
        }
        _ => Ok(StreamMessage::Ignored {
            channel: envelope.channel,
        }),
    }
}

fn payload<T: serde::de::DeserializeOwned>(envelope: &Envelope) -> Result<T> {
    if envelope.data.is_null() {
        return Err(Error::Decode(format!(
            "{} frame without data",
            envelope.channel
        )));
    }
    serde_json::from_value(envelope.data.clone())
        .map_err(|e| Error::Decode(format!("{} payload: {e}", envelope.channel)))
}

fn decode_entry<T: serde::de::DeserializeOwned>(
    value: Value,
    wallet: &WalletId,
    what: &'static str,
) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(entry) => Some(entry),
        Err(e) => {
            warn!(wallet = %wallet, entry = what, error = %e, "Skipping malformed entry");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_request_serializes_correctly() {
        let wallet = WalletId::new("0xABC");
        let json =
            serde_json::to_string(&SubscribeRequest::new(SubscriptionKind::UserFills, &wallet))
                .unwrap();
        assert_eq!(
            json,
            r#"{"method":"subscribe","subscription":{"type":"userFills","user":"0xabc"}}"#
        );
    }

    #[test]
    fn decodes_user_fills() {
        let raw = r#"{"channel":"userFills","data":{"user":"0xABC","isSnapshot":true,"fills":[
            {"coin":"ETH","px":"2500","sz":"1","side":"B","time":1,"startPosition":"0",
             "dir":"Open Long","closedPnl":"0","crossed":true,"tid":42}
        ]}}"#;
        match decode_frame(raw).unwrap() {
            StreamMessage::Fills { wallet, fills } => {
                assert_eq!(wallet.as_str(), "0xabc");
                assert_eq!(fills.len(), 1);
                assert_eq!(fills[0].trade_id, 42);
            }
            other => panic!("expected fills, got {other:?}"),
        }
    }

    #[test]
    fn malformed_fill_is_skipped_not_fatal() {
        let raw = r#"{"channel":"userFills","data":{"user":"0xabc","fills":[
            {"coin":"ETH"},
            {"coin":"BTC","tid":7,"time":5}
        ]}}"#;
        match decode_frame(raw).unwrap() {
            StreamMessage::Fills { fills, .. } => {
                assert_eq!(fills.len(), 1);
                assert_eq!(fills[0].coin, "BTC");
            }
            other => panic!("expected fills, got {other:?}"),
        }
    }

    #[test]
    fn absent_fills_is_empty() {
        let raw = r#"{"channel":"userFills","data":{"user":"0xabc"}}"#;
        assert!(matches!(
            decode_frame(raw).unwrap(),
            StreamMessage::Fills { fills, .. } if fills.is_empty()
        ));
    }

    #[test]
    fn decodes_positions_and_distinguishes_missing_from_empty() {
        let full = r#"{"channel":"webData2","data":{"user":"0xabc","clearinghouseState":{
            "assetPositions":[
                {"type":"oneWay","position":{"coin":"BTC","szi":"0.5","entryPx":"100",
                 "liquidationPx":null,"unrealizedPnl":"1","leverage":{"type":"cross","value":20}}},
                {"type":"oneWay"}
            ]}}}"#;
        match decode_frame(full).unwrap() {
            StreamMessage::Positions { positions, .. } => {
                let positions = positions.unwrap();
                assert_eq!(positions.len(), 1);
                assert_eq!(positions[0].coin.as_deref(), Some("BTC"));
                assert!(positions[0].liquidation_px.is_none());
            }
            other => panic!("expected positions, got {other:?}"),
        }

        let empty = r#"{"channel":"webData2","data":{"user":"0xabc","clearinghouseState":{"assetPositions":[]}}}"#;
        assert!(matches!(
            decode_frame(empty).unwrap(),
            StreamMessage::Positions { positions: Some(p), .. } if p.is_empty()
        ));

        let missing = r#"{"channel":"webData2","data":{"user":"0xabc","openOrders":[]}}"#;
        assert!(matches!(
            decode_frame(missing).unwrap(),
            StreamMessage::Positions { positions: None, .. }
        ));
    }

    #[test]
    fn unknown_channels_are_ignored() {
        let raw = r#"{"channel":"pong"}"#;
        assert_eq!(
            decode_frame(raw).unwrap(),
            StreamMessage::Ignored {
                channel: "pong".into()
            }
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode_frame("not json").is_err());
        assert!(decode_frame(r#"{"data":{}}"#).is_err());
        assert!(decode_frame(r#"{"channel":"userFills"}"#).is_err());
        assert!(decode_frame(r#"{"channel":"userFills","data":{"fills":[]}}"#).is_err());
    }
}
