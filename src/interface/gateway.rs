//! Submit and query surface over the decoder and the engine.

use super::metrics::LatencyStats;
use crate::OrderBookError;
use crate::config::EngineConfig;
use crate::decoder::{DecodedRecord, DecoderStats, InputRecord, MessageType, PacketDecoder, RECORD_LEN};
use crate::orderbook::{
    BookStatus, OrderBookEngine, OrderBookSnapshot, RejectReason, UpdateOutcome,
};
use crate::types::{Price, Quantity, Side, Symbol};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, trace};

/// Result of `submit_update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    Accepted,
    /// No level at the price and no free slot on that side
    RejectedFull,
    RejectedInvalid,
}

impl From<UpdateOutcome> for SubmitOutcome {
    fn from(outcome: UpdateOutcome) -> Self {
        match outcome {
            UpdateOutcome::Accepted => SubmitOutcome::Accepted,
            UpdateOutcome::Rejected(RejectReason::CapacityExceeded) => SubmitOutcome::RejectedFull,
            UpdateOutcome::Rejected(RejectReason::InvalidRecord) => SubmitOutcome::RejectedInvalid,
        }
    }
}

/// Top of book for one symbol in decimal units.
///
/// An empty side reads as price `0.0` with quantity `0`. `valid` is false
/// when no update has created the book yet; callers should poll again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookQuote {
    pub symbol: Symbol,
    pub best_bid_price: f64,
    pub best_bid_qty: Quantity,
    pub best_ask_price: f64,
    pub best_ask_qty: Quantity,
    pub sequence: u64,
    /// When the book last changed, in milliseconds since the epoch
    pub timestamp: u64,
    pub valid: bool,
}

impl BookQuote {
    fn not_ready(symbol: Symbol) -> Self {
        Self {
            symbol,
            best_bid_price: 0.0,
            best_bid_qty: 0,
            best_ask_price: 0.0,
            best_ask_qty: 0,
            sequence: 0,
            timestamp: 0,
            valid: false,
        }
    }

    /// Best bid as `(price, quantity)` if the side is populated.
    pub fn best_bid(&self) -> Option<(f64, Quantity)> {
        (self.valid && self.best_bid_qty > 0).then_some((self.best_bid_price, self.best_bid_qty))
    }

    /// Best ask as `(price, quantity)` if the side is populated.
    pub fn best_ask(&self) -> Option<(f64, Quantity)> {
        (self.valid && self.best_ask_qty > 0).then_some((self.best_ask_price, self.best_ask_qty))
    }
}

/// Engine-wide status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Any book has its bid side full
    pub bid_full: bool,
    /// Any book has its ask side full
    pub ask_full: bool,
    pub books: Vec<BookStatus>,
    /// Mean submit latency in nanoseconds
    pub measured_latency_ns: f64,
    /// Updates per second of processing time
    pub measured_throughput: u64,
    pub latency: LatencyStats,
    pub decoder: DecoderStats,
}

/// Counts from one `ingest` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    pub records: u64,
    pub accepted: u64,
    pub rejected_full: u64,
    pub rejected_invalid: u64,
}

/// The boundary through which callers submit updates and read books.
///
/// Every update, whether submitted as values or ingested as raw bytes, is
/// encoded into the wire record and runs through the packet decoder before
/// reaching the engine.
pub struct TradingInterface {
    decoder: PacketDecoder,
    engine: OrderBookEngine,
    latency: LatencyStats,
}

impl TradingInterface {
    pub fn new(config: EngineConfig) -> Result<Self, OrderBookError> {
        debug!(
            "Trading interface: starting with {} levels per side",
            config.max_levels
        );
        Ok(Self {
            decoder: PacketDecoder::new(),
            engine: OrderBookEngine::new(config)?,
            latency: LatencyStats::new(),
        })
    }

    pub fn engine(&self) -> &OrderBookEngine {
        &self.engine
    }

    pub fn decoder(&self) -> &PacketDecoder {
        &self.decoder
    }

    /// Submit one update. Symbol and price are validated before anything is sent to the decoder.
    pub fn submit_update(
        &mut self,
        symbol: &str,
        decimal_price: f64,
        quantity: Quantity,
        side: Side,
    ) -> Result<SubmitOutcome, OrderBookError> {
        let started = Instant::now();
        let symbol = Symbol::new(symbol)?;
        let price = Price::from_f64(decimal_price)?;

        let record = InputRecord::encode(MessageType::Order, symbol, price, quantity, side);
        let outcome = self.process(&record)?;
        self.latency.record(started.elapsed());

        trace!(
            "Trading interface: {} {} {} x {} -> {:?}",
            symbol, side, price, quantity, outcome
        );
        Ok(outcome.into())
    }

    /// Order-entry form of [`submit_update`](Self::submit_update): a buy
    /// updates the bid side, a sell the ask side.
    pub fn place_order(
        &mut self,
        symbol: &str,
        price: f64,
        quantity: Quantity,
        is_buy: bool,
    ) -> Result<SubmitOutcome, OrderBookError> {
        let side = if is_buy { Side::Bid } else { Side::Ask };
        self.submit_update(symbol, price, quantity, side)
    }

    /// Decode and apply a raw byte stream, one [`RECORD_LEN`] record at a time.
    ///
    /// A trailing partial record is decoded best-effort like any other malformed input.
    pub fn ingest(&mut self, bytes: &[u8]) -> Result<IngestSummary, OrderBookError> {
        let mut summary = IngestSummary::default();
        for chunk in bytes.chunks(RECORD_LEN) {
            let started = Instant::now();
            let outcome = self.process(&InputRecord::from_bytes(chunk))?;
            self.latency.record(started.elapsed());

            summary.records += 1;
            match SubmitOutcome::from(outcome) {
                SubmitOutcome::Accepted => summary.accepted += 1,
                SubmitOutcome::RejectedFull => summary.rejected_full += 1,
                SubmitOutcome::RejectedInvalid => summary.rejected_invalid += 1,
            }
        }
        debug!("Trading interface: ingested {:?}", summary);
        Ok(summary)
    }

    fn process(&mut self, record: &InputRecord) -> Result<UpdateOutcome, OrderBookError> {
        let decoded: DecodedRecord = self.decoder.decode(record)?;
        Ok(self.engine.apply_update(&decoded))
    }

    /// Top of book for `symbol`.
    pub fn query_book(&self, symbol: &str) -> Result<BookQuote, OrderBookError> {
        let symbol = Symbol::new(symbol)?;
        let quote = self.engine.with_book(&symbol, |book| {
            let bid = book.best_bid();
            let ask = book.best_ask();
            BookQuote {
                symbol,
                best_bid_price: bid.map_or(0.0, |level| level.price.to_f64()),
                best_bid_qty: bid.map_or(0, |level| level.quantity),
                best_ask_price: ask.map_or(0.0, |level| level.price.to_f64()),
                best_ask_qty: ask.map_or(0, |level| level.quantity),
                sequence: book.sequence(),
                timestamp: book.last_update(),
                valid: true,
            }
        });
        Ok(quote.unwrap_or_else(|| BookQuote::not_ready(symbol)))
    }

    /// Capacity flags and measured performance.
    pub fn query_status(&self) -> StatusReport {
        let books = self.engine.statuses();
        StatusReport {
            bid_full: books.iter().any(|status| status.bid_full),
            ask_full: books.iter().any(|status| status.ask_full),
            books,
            measured_latency_ns: self.latency.mean_ns(),
            measured_throughput: self.latency.throughput_per_sec(),
            latency: self.latency,
            decoder: *self.decoder.stats(),
        }
    }

    /// Depth snapshot for `symbol`; `NotReady` until the book exists.
    pub fn snapshot(
        &self,
        symbol: &str,
        depth: Option<usize>,
    ) -> Result<OrderBookSnapshot, OrderBookError> {
        let symbol = Symbol::new(symbol)?;
        self.engine
            .snapshot(&symbol, depth)
            .ok_or_else(|| OrderBookError::NotReady {
                context: format!("no book for {}", symbol),
            })
    }
}
