//! Core value types shared by the decoder and the order book engine.

mod price;
mod side;
mod symbol;

pub use price::{PRICE_DECIMALS, PRICE_SCALE, Price};
pub use side::Side;
pub use symbol::{SYMBOL_LEN, Symbol};

/// Aggregate quantity resting at a price level. Matches the 32-bit quantity field of the wire record.
pub type Quantity = u32;
