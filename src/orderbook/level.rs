//! Bounded price level storage for one side of one book.

use super::outcome::{RejectReason, SlotChange};
use crate::types::{Price, Quantity, Side};
use serde::{Deserialize, Serialize};

/// Aggregate quantity at one price. Invalid slots are free for reuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: Price,
    pub quantity: Quantity,
    pub valid: bool,
}

/// Fixed array of price level slots for one side.
///
/// Slots are never compacted. An update reuses the slot already holding its
/// price, otherwise the first free slot. When neither exists the store
/// latches `full` and rejects new prices until an accepted mutation clears it.
/// The best level is recomputed by a full scan after every mutation.
#[derive(Debug, Clone)]
pub struct LevelStore {
    side: Side,
    levels: Box<[PriceLevel]>,
    best: Option<usize>,
    active: usize,
    full: bool,
}

impl LevelStore {
    /// Allocate `capacity` free slots. This is the only allocation the store makes.
    pub fn new(side: Side, capacity: usize) -> Self {
        Self {
            side,
            levels: vec![PriceLevel::default(); capacity].into_boxed_slice(),
            best: None,
            active: 0,
            full: false,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn capacity(&self) -> usize {
        self.levels.len()
    }

    /// Number of valid levels.
    pub fn len(&self) -> usize {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    /// Durable capacity status, set by a rejected insert.
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Slot index of the best level.
    pub fn best_index(&self) -> Option<usize> {
        self.best
    }

    pub fn best(&self) -> Option<&PriceLevel> {
        self.best.map(|index| &self.levels[index])
    }

    /// All slots, free ones included, in slot order.
    pub fn slots(&self) -> &[PriceLevel] {
        &self.levels
    }

    pub fn iter_valid(&self) -> impl Iterator<Item = &PriceLevel> {
        self.levels.iter().filter(|level| level.valid)
    }

    /// Slot holding a valid level at `price`.
    pub fn find(&self, price: Price) -> Option<usize> {
        self.levels
            .iter()
            .position(|level| level.valid && level.price == price)
    }

    /// First free slot.
    pub fn first_free(&self) -> Option<usize> {
        self.levels.iter().position(|level| !level.valid)
    }

    /// Replace the quantity at `price`, inserting or freeing a slot as needed.
    pub fn apply(&mut self, price: Price, quantity: Quantity) -> Result<SlotChange, RejectReason> {
        let mut matched = None;
        let mut free = None;
        for (index, level) in self.levels.iter().enumerate() {
            if level.valid {
                if level.price == price {
                    matched = Some(index);
                    break;
                }
            } else if free.is_none() {
                free = Some(index);
            }
        }

        let change = match (matched, free) {
            (Some(index), _) if quantity == 0 => {
                self.levels[index] = PriceLevel::default();
                self.active -= 1;
                SlotChange::Removed(index)
            }
            (Some(index), _) if self.levels[index].quantity == quantity => {
                self.full = false;
                return Ok(SlotChange::Unchanged);
            }
            (Some(index), _) => {
                self.levels[index].quantity = quantity;
                SlotChange::Updated(index)
            }
            (None, _) if quantity == 0 => return Ok(SlotChange::Unchanged),
            (None, Some(index)) => {
                self.levels[index] = PriceLevel {
                    price,
                    quantity,
                    valid: true,
                };
                self.active += 1;
                SlotChange::Inserted(index)
            }
            (None, None) => {
                self.full = true;
                return Err(RejectReason::CapacityExceeded);
            }
        };

        self.full = false;
        self.recompute_best();
        Ok(change)
    }

    /// Full linear scan for the best valid level. Ties keep the lowest slot.
    fn recompute_best(&mut self) {
        let mut best: Option<usize> = None;
        for (index, level) in self.levels.iter().enumerate() {
            if !level.valid {
                continue;
            }
            let better = match best {
                None => true,
                Some(current) => self.side.is_better(level.price, self.levels[current].price),
            };
            if better {
                best = Some(index);
            }
        }
        self.best = best;
    }
}
