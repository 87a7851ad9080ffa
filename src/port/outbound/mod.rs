//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the collaborators the reconciliation core
//! depends on: the venue stream and its wire protocol, the notification
//! channel, fill persistence and message formatting.

pub mod formatter;
pub mod notifier;
pub mod protocol;
pub mod store;
pub mod transport;
