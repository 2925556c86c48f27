//! Order book for a single instrument

use super::level::{LevelStore, PriceLevel};
use super::outcome::{RejectReason, UpdateOutcome};
use super::snapshot::{LevelSnapshot, OrderBookSnapshot};
use crate::decoder::DecodedRecord;
use crate::types::{Price, Side, Symbol};
use crate::utils::current_time_millis;
use tracing::{trace, warn};

/// Bid and ask level stores for one symbol.
///
/// Every accepted update is applied in full, including the best-price
/// recompute, before `apply_update` returns. Crossed books are kept as-is.
#[derive(Debug, Clone)]
pub struct OrderBook {
    /// The instrument this book tracks
    symbol: Symbol,

    /// Bid side price levels
    bids: LevelStore,

    /// Ask side price levels
    asks: LevelStore,

    /// Count of accepted mutations
    sequence: u64,

    /// Milliseconds since the epoch of the last accepted mutation, 0 before any
    last_update: u64,
}

impl OrderBook {
    /// Create an empty book with `max_levels` slots per side
    pub fn new(symbol: Symbol, max_levels: usize) -> Self {
        Self {
            symbol,
            bids: LevelStore::new(Side::Bid, max_levels),
            asks: LevelStore::new(Side::Ask, max_levels),
            sequence: 0,
            last_update: 0,
        }
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Count of accepted mutations
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// When the book last changed, in milliseconds since the epoch
    pub fn last_update(&self) -> u64 {
        self.last_update
    }

    /// Level store for one side
    pub fn side(&self, side: Side) -> &LevelStore {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut LevelStore {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    /// Apply one decoded record: replace, insert, or (quantity zero) remove a level.
    pub fn apply_update(&mut self, record: &DecodedRecord) -> UpdateOutcome {
        if !record.valid || record.symbol != self.symbol {
            warn!(
                "Order book {}: ignoring invalid record {:?}",
                self.symbol, record
            );
            return UpdateOutcome::Rejected(RejectReason::InvalidRecord);
        }

        let symbol = self.symbol;
        let result = self.side_mut(record.side).apply(record.price, record.quantity);
        match result {
            Ok(change) => {
                if change.is_mutation() {
                    self.sequence += 1;
                    self.last_update = current_time_millis();
                }
                trace!(
                    "Order book {}: {} {} x {} -> {:?}",
                    symbol, record.side, record.price, record.quantity, change
                );
                UpdateOutcome::Accepted
            }
            Err(reason) => {
                warn!(
                    "Order book {}: rejected {} {} x {}: {}",
                    symbol, record.side, record.price, record.quantity, reason
                );
                UpdateOutcome::Rejected(reason)
            }
        }
    }

    /// Get the best bid level, if any
    pub fn best_bid(&self) -> Option<PriceLevel> {
        self.bids.best().copied()
    }

    /// Get the best ask level, if any
    pub fn best_ask(&self) -> Option<PriceLevel> {
        self.asks.best().copied()
    }

    /// Get the spread (best ask - best bid), zero when crossed
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.price.saturating_sub(bid.price)),
            _ => None,
        }
    }

    /// Get the mid price in decimal units
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid.price.to_f64() + ask.price.to_f64()) / 2.0),
            _ => None,
        }
    }

    /// Best bid at or above best ask. The engine does not correct this state.
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid.price >= ask.price,
            _ => false,
        }
    }

    pub fn is_full(&self, side: Side) -> bool {
        self.side(side).is_full()
    }

    /// Number of valid levels on a side
    pub fn level_count(&self, side: Side) -> usize {
        self.side(side).len()
    }

    /// Create a snapshot of the top `depth` levels of each side
    pub fn create_snapshot(&self, depth: usize) -> OrderBookSnapshot {
        let collect = |store: &LevelStore| {
            let mut levels: Vec<LevelSnapshot> = store
                .iter_valid()
                .map(|level| LevelSnapshot {
                    price: level.price,
                    quantity: level.quantity,
                })
                .collect();
            match store.side() {
                Side::Bid => levels.sort_by(|a, b| b.price.cmp(&a.price)),
                Side::Ask => levels.sort_by(|a, b| a.price.cmp(&b.price)),
            }
            levels.truncate(depth);
            levels
        };

        OrderBookSnapshot {
            symbol: self.symbol,
            timestamp: current_time_millis(),
            sequence: self.sequence,
            bids: collect(&self.bids),
            asks: collect(&self.asks),
            bid_full: self.bids.is_full(),
            ask_full: self.asks.is_full(),
        }
    }
}
