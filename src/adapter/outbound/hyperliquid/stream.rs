//! Hyperliquid websocket transport.
//!
//! Wraps a tokio-tungstenite connection behind [`StreamTransport`]. Control
//! frames never reach the session: server pings are answered here, and a
//! `{"method":"ping"}` heartbeat is sent every `ping_interval` while the
//! session is reading, which keeps the venue from dropping an idle socket.
//! The venue answers heartbeats on the `pong` channel, which the protocol
//! layer ignores.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, trace};

use crate::error::{Error, Result};
use crate::port::StreamTransport;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

const HEARTBEAT: &str = r#"{"method":"ping"}"#;

/// Websocket connection to the Hyperliquid info stream.
pub struct HyperliquidTransport {
    url: String,
    ping_interval: Duration,
    ws: Option<WsStream>,
    keepalive: Option<Interval>,
}

impl HyperliquidTransport {
    #[must_use]
    pub fn new(url: impl Into<String>, ping_interval: Duration) -> Self {
        Self {
            url: url.into(),
            ping_interval,
            ws: None,
            keepalive: None,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.ws.is_some()
    }
}

#[async_trait]
impl StreamTransport for HyperliquidTransport {
    async fn connect(&mut self) -> Result<()> {
        self.ws = None;
        info!(url = %self.url, "Connecting to WebSocket");
        let (ws_stream, response) = connect_async(self.url.as_str()).await?;
        info!(status = %response.status(), "WebSocket connected");

        let mut keepalive = interval_at(Instant::now() + self.ping_interval, self.ping_interval);
        keepalive.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.ws = Some(ws_stream);
        self.keepalive = Some(keepalive);
        Ok(())
    }

    async fn send(&mut self, text: String) -> Result<()> {
        let ws = self
            .ws
            .as_mut()
            .ok_or_else(|| Error::Connection("Not connected".into()))?;
        trace!(bytes = text.len(), "Sending WebSocket text frame");
        ws.send(Message::Text(text)).await?;
        Ok(())
    }

    async fn recv(&mut self) -> Result<Option<String>> {
        let (Some(ws), Some(keepalive)) = (self.ws.as_mut(), self.keepalive.as_mut()) else {
            return Err(Error::Connection("Not connected".into()));
        };

        loop {
            tokio::select! {
                _ = keepalive.tick() => {
                    trace!("Sending heartbeat");
                    ws.send(Message::Text(HEARTBEAT.to_string())).await?;
                }
                frame = ws.next() => match frame {
                    Some(Ok(Message::Text(text))) => {
                        trace!(bytes = text.len(), "Received WebSocket text frame");
                        return Ok(Some(text));
                    }
                    Some(Ok(Message::Ping(data))) => {
                        trace!("Received WebSocket ping");
                        ws.send(Message::Pong(data)).await?;
                    }
                    Some(Ok(Message::Close(frame))) => {
                        info!(frame = ?frame, "WebSocket closed by server");
                        return Ok(None);
                    }
                    // Binary, Pong and raw frames carry nothing for us.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => {
                        info!("WebSocket stream ended");
                        return Ok(None);
                    }
                },
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.keepalive = None;
        let Some(mut ws) = self.ws.take() else {
            return Ok(());
        };
        match ws.close(None).await {
            Ok(())
            | Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                debug!("WebSocket closed");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "hyperliquid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn io_before_connect_is_a_connection_error() {
        let mut transport = HyperliquidTransport::new("ws://127.0.0.1:9", Duration::from_secs(20));
        assert!(!transport.is_connected());
        assert!(matches!(
            transport.send("x".into()).await,
            Err(Error::Connection(_))
        ));
        assert!(matches!(transport.recv().await, Err(Error::Connection(_))));
    }

    #[tokio::test]
    async fn close_without_connection_is_noop() {
        let mut transport = HyperliquidTransport::new("ws://127.0.0.1:9", Duration::from_secs(20));
        assert!(transport.close().await.is_ok());
        assert!(transport.close().await.is_ok());
    }

    #[tokio::test]
    async fn connect_to_closed_port_fails() {
        let mut transport = HyperliquidTransport::new("ws://127.0.0.1:9", Duration::from_secs(20));
        assert!(transport.connect().await.is_err());
        assert!(!transport.is_connected());
    }
}
