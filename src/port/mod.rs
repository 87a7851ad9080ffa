//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Session · Diff · Queue ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌──────────┐           ┌─────────────┐              ┌───────────┐
//! │Transport │           │  Snapshot   │              │ Notifier  │
//! │ Adapter  │           │   Store     │              │  Adapter  │
//! └──────────┘           └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`StreamTransport`] - Venue websocket connection
//! - [`StreamProtocol`] - Subscription frames and frame decoding
//! - [`Notifier`] - Notification delivery (Telegram, logging)
//! - [`SnapshotStore`] - Persistence of seen fills
//! - [`EventFormatter`] - Rendering of domain events

pub mod outbound;

pub use outbound::formatter::EventFormatter;
pub use outbound::notifier::Notifier;
pub use outbound::protocol::{StreamMessage, StreamProtocol};
pub use outbound::store::SnapshotStore;
pub use outbound::transport::StreamTransport;
