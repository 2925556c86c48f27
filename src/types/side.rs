use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Price;
use crate::orderbook::OrderBookError;

/// Side of the book a price level rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy interest; best is the highest price.
    Bid,
    /// Sell interest; best is the lowest price.
    Ask,
}

impl Side {
    /// The other side of the book.
    pub fn opposite(&self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }

    /// Whether `candidate` is a strictly better price than `incumbent` on this side.
    pub fn is_better(&self, candidate: Price, incumbent: Price) -> bool {
        match self {
            Side::Bid => candidate > incumbent,
            Side::Ask => candidate < incumbent,
        }
    }

    /// Byte used for this side in the wire record.
    pub const fn wire_code(self) -> u8 {
        match self {
            Side::Bid => 0,
            Side::Ask => 1,
        }
    }

    /// Decode a wire side byte. Unknown codes decode as `Ask` and report `false`.
    pub const fn from_wire(code: u8) -> (Side, bool) {
        match code {
            0 => (Side::Bid, true),
            1 => (Side::Ask, true),
            _ => (Side::Ask, false),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "BID"),
            Side::Ask => write!(f, "ASK"),
        }
    }
}

impl FromStr for Side {
    type Err = OrderBookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BID" | "BUY" => Ok(Side::Bid),
            "ASK" | "SELL" => Ok(Side::Ask),
            _ => Err(OrderBookError::InvalidOperation {
                message: format!("unknown side: {s}"),
            }),
        }
    }
}
