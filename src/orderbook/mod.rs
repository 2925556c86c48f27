//! Bounded, price-indexed order books and the engine that maintains them.

pub mod book;
pub mod engine;
mod error;
pub mod level;
mod outcome;
mod snapshot;

pub use book::OrderBook;
pub use engine::{BookStatus, OrderBookEngine};
pub use error::OrderBookError;
pub use level::{LevelStore, PriceLevel};
pub use outcome::{RejectReason, SlotChange, UpdateOutcome};
pub use snapshot::{LevelSnapshot, OrderBookSnapshot};
