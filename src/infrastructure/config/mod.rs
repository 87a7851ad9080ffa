//! Infrastructure configuration modules.

pub mod delivery;
pub mod logging;
pub mod settings;
pub mod store;
pub mod stream;
pub mod telegram;
