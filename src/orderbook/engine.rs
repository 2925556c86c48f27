//! Symbol-keyed collection of order books

use super::book::OrderBook;
use super::level::PriceLevel;
use super::outcome::{RejectReason, UpdateOutcome};
use super::snapshot::OrderBookSnapshot;
use crate::config::EngineConfig;
use crate::decoder::DecodedRecord;
use crate::types::{Side, Symbol};
use crate::OrderBookError;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Capacity status of one book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookStatus {
    pub symbol: Symbol,
    pub bid_full: bool,
    pub ask_full: bool,
    pub bid_levels: usize,
    pub ask_levels: usize,
    pub sequence: u64,
}

/// Routes decoded records to per-symbol books.
///
/// A book is created by the first update that references its symbol and is
/// kept for the life of the engine. Each update holds the book's map entry
/// exclusively while it runs, so readers see the book either before or
/// after an update, never in between.
pub struct OrderBookEngine {
    config: EngineConfig,

    books: DashMap<Symbol, OrderBook>,

    /// Updates that returned `Accepted`
    accepted: AtomicU64,

    /// Updates that returned `Rejected`
    rejected: AtomicU64,
}

impl OrderBookEngine {
    /// Create an engine after validating `config`
    pub fn new(config: EngineConfig) -> Result<Self, OrderBookError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: EngineConfig) -> Self {
        Self {
            config,
            books: DashMap::new(),
            accepted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Apply a decoded record to the book for its symbol.
    pub fn apply_update(&self, record: &DecodedRecord) -> UpdateOutcome {
        // invalid records must not create books
        let outcome = if record.valid {
            let mut book = self.books.entry(record.symbol).or_insert_with(|| {
                debug!(
                    "Engine: creating book for {} with {} levels per side",
                    record.symbol, self.config.max_levels
                );
                OrderBook::new(record.symbol, self.config.max_levels)
            });
            book.apply_update(record)
        } else {
            UpdateOutcome::Rejected(RejectReason::InvalidRecord)
        };

        match outcome {
            UpdateOutcome::Accepted => self.accepted.fetch_add(1, Ordering::Relaxed),
            UpdateOutcome::Rejected(_) => self.rejected.fetch_add(1, Ordering::Relaxed),
        };
        outcome
    }

    /// Run `f` against the book for `symbol`, if it exists
    pub fn with_book<R>(&self, symbol: &Symbol, f: impl FnOnce(&OrderBook) -> R) -> Option<R> {
        self.books.get(symbol).map(|book| f(book.value()))
    }

    pub fn has_book(&self, symbol: &Symbol) -> bool {
        self.books.contains_key(symbol)
    }

    /// Get the best bid level, if any
    pub fn best_bid(&self, symbol: &Symbol) -> Option<PriceLevel> {
        self.with_book(symbol, |book| book.best_bid()).flatten()
    }

    /// Get the best ask level, if any
    pub fn best_ask(&self, symbol: &Symbol) -> Option<PriceLevel> {
        self.with_book(symbol, |book| book.best_ask()).flatten()
    }

    /// Durable full status of one side; false for unknown symbols
    pub fn is_full(&self, symbol: &Symbol, side: Side) -> bool {
        self.with_book(symbol, |book| book.is_full(side))
            .unwrap_or(false)
    }

    pub fn book_status(&self, symbol: &Symbol) -> Option<BookStatus> {
        self.with_book(symbol, status_of)
    }

    /// Status of every book, ordered by symbol
    pub fn statuses(&self) -> Vec<BookStatus> {
        let mut statuses: Vec<BookStatus> = self.books.iter().map(|book| status_of(&book)).collect();
        statuses.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        statuses
    }

    /// Symbols with a book, ordered
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self.books.iter().map(|book| *book.key()).collect();
        symbols.sort();
        symbols
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Snapshot of one book; `depth` defaults to the configured snapshot depth
    pub fn snapshot(&self, symbol: &Symbol, depth: Option<usize>) -> Option<OrderBookSnapshot> {
        let depth = depth.unwrap_or(self.config.snapshot_depth);
        self.with_book(symbol, |book| book.create_snapshot(depth))
    }

    pub fn accepted_updates(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    pub fn rejected_updates(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }
}

impl Default for OrderBookEngine {
    /// The default config is always valid.
    fn default() -> Self {
        Self::with_valid_config(EngineConfig::default())
    }
}

fn status_of(book: &OrderBook) -> BookStatus {
    BookStatus {
        symbol: book.symbol(),
        bid_full: book.is_full(Side::Bid),
        ask_full: book.is_full(Side::Ask),
        bid_levels: book.level_count(Side::Bid),
        ask_levels: book.level_count(Side::Ask),
        sequence: book.sequence(),
    }
}
