//! Notification adapters: HTML rendering of domain events and the
//! transports that deliver the rendered text.

pub mod format;
pub mod log;
#[cfg(feature = "telegram")]
pub mod telegram;

pub use format::HtmlFormatter;
pub use log::LogNotifier;
#[cfg(feature = "telegram")]
pub use telegram::{TelegramConfig, TelegramNotifier};
