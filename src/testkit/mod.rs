//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`transport`] - [`ScriptedTransport`](transport::ScriptedTransport), a
//!   [`StreamTransport`](crate::port::StreamTransport) fed from a script.
//! - [`notifier`] - [`RecordingNotifier`](notifier::RecordingNotifier) with
//!   injectable latency and failures.
//! - [`store`] - [`FailingStore`](store::FailingStore) for persistence errors.
//! - [`domain`] - Builders for fills, positions and venue frames.

pub mod domain;
pub mod notifier;
pub mod store;
pub mod transport;
