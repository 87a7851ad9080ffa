//! Stream transport port.
//!
//! The socket-level connection to the venue. The session manager drives it
//! through connect, send, receive and close; everything protocol-specific
//! (subscription messages, frame decoding) lives above this trait.

use async_trait::async_trait;

use crate::error::Result;

/// Bidirectional text-frame transport to the venue.
#[async_trait]
pub trait StreamTransport: Send {
    /// Establish a fresh connection, replacing any previous one.
    async fn connect(&mut self) -> Result<()>;

    /// Send one text frame.
    async fn send(&mut self, text: String) -> Result<()>;

    /// Wait for the next inbound text frame.
    ///
    /// Returns `Ok(None)` when the remote closed the connection cleanly and
    /// `Err` on any other transport failure. Control frames are handled by
    /// the implementation and never surface here.
    async fn recv(&mut self) -> Result<Option<String>>;

    /// Close the connection. Closing an already closed transport is a no-op.
    async fn close(&mut self) -> Result<()>;

    /// Transport name for logging.
    fn name(&self) -> &'static str;
}
