//! # Deterministic Market Data Decoder and Bounded Order Book
//!
//! A low-latency building block for automated trading: a fixed-latency
//! packet decoder that normalizes raw market data records, feeding an order
//! book engine that keeps a live best-bid / best-ask view per instrument
//! inside a fixed memory budget.
//!
//! ## Key Features
//!
//! - **Fixed-Latency Decoding**: Every 32-byte input record passes through the
//!   same five decoder states, so the number of steps from input to decoded
//!   record never depends on the data. Malformed input is decoded best-effort
//!   and counted, never fatal.
//!
//! - **Bounded Price Level Storage**: Each side of each book owns a fixed
//!   array of price level slots, allocated once when the book is created.
//!   Updates reuse the slot already holding their price or the first free
//!   slot; nothing is compacted or reallocated on the update path.
//!
//! - **Synchronous Best-Price Tracking**: The best bid (highest price) and
//!   best ask (lowest price) are recomputed with a full scan on every
//!   accepted update, so a reader never observes a stale best after an
//!   update has returned.
//!
//! - **Durable Capacity Status**: When a side has no free slot, inserts at
//!   new prices are rejected and the side reports `full` until a quantity-zero
//!   update frees a slot or an existing level is updated.
//!
//! - **Fixed-Point Prices**: Prices are integers scaled by 10^6. Conversion
//!   from decimals truncates toward zero.
//!
//! ## Data Flow
//!
//! ```text
//! bytes ─▶ PacketDecoder ─▶ DecodedRecord ─▶ OrderBookEngine ─▶ LevelStore
//!                                                   │
//!                          TradingInterface ◀───────┘ (query_book / query_status)
//! ```
//!
//! ## Example
//!
//! ```
//! use orderbook_feed::{EngineConfig, Side, SubmitOutcome, TradingInterface};
//!
//! let mut interface = TradingInterface::new(EngineConfig::default())?;
//! assert_eq!(
//!     interface.submit_update("AAPL", 104.50, 200, Side::Bid)?,
//!     SubmitOutcome::Accepted
//! );
//! interface.submit_update("AAPL", 104.75, 150, Side::Ask)?;
//!
//! let quote = interface.query_book("AAPL")?;
//! assert!(quote.valid);
//! assert_eq!(quote.best_bid(), Some((104.50, 200)));
//! assert_eq!(quote.best_ask(), Some((104.75, 150)));
//! # Ok::<(), orderbook_feed::OrderBookError>(())
//! ```
//!
//! ## Consistency Model
//!
//! Each book has a single writer at a time. An update holds its book
//! exclusively until the level store and the best index are both updated;
//! concurrent readers see the book either before or after it. Crossed books
//! (best bid at or above best ask) are representable and left uncorrected.
//!
//! Nothing here blocks on a timeout. Callers polling for a valid quote are
//! responsible for their own deadlines.
//!
//! ## Status
//! Order matching, persistence and trading strategy logic are out of scope.

pub mod config;
pub mod decoder;
pub mod interface;
pub mod orderbook;
pub mod types;

mod utils;

pub use config::EngineConfig;
pub use decoder::{DecodedRecord, InputRecord, MessageType, PacketDecoder};
pub use interface::{BookQuote, StatusReport, SubmitOutcome, TradingInterface};
pub use orderbook::{
    OrderBook, OrderBookEngine, OrderBookError, OrderBookSnapshot, RejectReason, UpdateOutcome,
};
pub use types::{Price, Quantity, Side, Symbol};
pub use utils::current_time_millis;
