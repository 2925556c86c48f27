//! Results of applying an update to a book

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an update was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// No level at this price and no free slot on the side
    CapacityExceeded,
    /// The record was not marked valid, or was routed to the wrong book
    InvalidRecord,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::CapacityExceeded => write!(f, "capacity exceeded"),
            RejectReason::InvalidRecord => write!(f, "invalid record"),
        }
    }
}

/// Outcome of a single update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOutcome {
    Accepted,
    Rejected(RejectReason),
}

impl UpdateOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, UpdateOutcome::Accepted)
    }
}

/// What a level store did with an accepted update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotChange {
    /// A free slot now holds a new price
    Inserted(usize),
    /// The quantity of an existing level was replaced
    Updated(usize),
    /// Quantity zero freed the slot
    Removed(usize),
    /// Quantity zero for a price that is not in the book, or the level
    /// already holds this quantity
    Unchanged,
}

impl SlotChange {
    /// Whether the store was modified.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, SlotChange::Unchanged)
    }
}
