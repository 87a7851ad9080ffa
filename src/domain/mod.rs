//! Venue-agnostic domain types: wallets, positions, fills and the events
//! reconciliation derives from them.

mod event;
mod fill;
mod id;
mod position;
mod state;

pub mod num;

pub use event::DomainEvent;
pub use fill::{Fill, FillTable};
pub use id::{FillKey, ParseFillKeyError, PositionKey, WalletId};
pub use position::{PositionSnapshot, RawLeverage, RawPosition, Side};
pub use state::{PositionTable, WalletState};
