//! fillwatch - Hyperliquid wallet activity relayed to Telegram.
//!
//! The crate keeps one websocket session to the venue, subscribes to the
//! fills (and optionally position snapshots) of every monitored wallet,
//! reconciles each update against remembered state, and posts a message for
//! every new fill, opened position and closed position.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Wallets, fills, position snapshots and domain events
//! - [`port`] - Traits for the transport, protocol, store, formatter and notifier
//! - [`application`] - Reconciliation, the delivery queue and the session loop
//! - [`adapter`] - Hyperliquid websocket, Telegram/log notifiers, JSON store
//! - [`infrastructure`] - Configuration, wiring and the runtime entry point
//! - [`cli`] - Command-line interface
//!
//! # Features
//!
//! - `telegram` (default) - Deliver notifications through the Telegram Bot API
//! - `testkit` - Scripted transports and recording notifiers for tests
//!
//! # Example
//!
//! ```no_run
//! use fillwatch::infrastructure::config::settings::Config;
//! use fillwatch::infrastructure::App;
//!
//! # async fn run() -> fillwatch::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! config.init_logging();
//! App::run(config).await
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
