//! Wire record layout and the normalized decoder output.
//!
//! | offset | width | field |
//! |-------:|------:|-------|
//! | 0  | 1 | message type (`T`, `Q`, `O`) |
//! | 1  | 1 | side (`0` bid, `1` ask) |
//! | 2  | 6 | reserved |
//! | 8  | 8 | symbol, NUL padded |
//! | 16 | 8 | price, fixed point, big endian |
//! | 24 | 4 | quantity, big endian |
//! | 28 | 4 | reserved |

use crate::types::{Price, Quantity, SYMBOL_LEN, Side, Symbol};
use serde::{Deserialize, Serialize};

/// Size of one wire record in bytes.
pub const RECORD_LEN: usize = 32;

const MESSAGE_TYPE_OFFSET: usize = 0;
const SIDE_OFFSET: usize = 1;
const SYMBOL_OFFSET: usize = 8;
const PRICE_OFFSET: usize = 16;
const QUANTITY_OFFSET: usize = 24;

/// Classification carried in the record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Trade,
    Quote,
    Order,
    /// Header byte was not recognised
    Undefined,
}

impl MessageType {
    pub const fn from_wire(code: u8) -> Self {
        match code {
            b'T' => MessageType::Trade,
            b'Q' => MessageType::Quote,
            b'O' => MessageType::Order,
            _ => MessageType::Undefined,
        }
    }

    pub const fn wire_code(self) -> u8 {
        match self {
            MessageType::Trade => b'T',
            MessageType::Quote => b'Q',
            MessageType::Order => b'O',
            MessageType::Undefined => 0,
        }
    }
}

/// One fixed-width record as it arrives on the input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputRecord {
    bytes: [u8; RECORD_LEN],
    truncated: bool,
}

impl InputRecord {
    /// Frame a record from raw bytes.
    ///
    /// Short input is zero padded and marked truncated; bytes past
    /// [`RECORD_LEN`] are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let len = bytes.len().min(RECORD_LEN);
        let mut record = [0u8; RECORD_LEN];
        record[..len].copy_from_slice(&bytes[..len]);
        Self {
            bytes: record,
            truncated: bytes.len() < RECORD_LEN,
        }
    }

    /// Encode an update into the wire layout.
    pub fn encode(
        message_type: MessageType,
        symbol: Symbol,
        price: Price,
        quantity: Quantity,
        side: Side,
    ) -> Self {
        let mut bytes = [0u8; RECORD_LEN];
        bytes[MESSAGE_TYPE_OFFSET] = message_type.wire_code();
        bytes[SIDE_OFFSET] = side.wire_code();
        bytes[SYMBOL_OFFSET..SYMBOL_OFFSET + SYMBOL_LEN].copy_from_slice(symbol.as_bytes());
        bytes[PRICE_OFFSET..PRICE_OFFSET + 8].copy_from_slice(&price.raw().to_be_bytes());
        bytes[QUANTITY_OFFSET..QUANTITY_OFFSET + 4].copy_from_slice(&quantity.to_be_bytes());
        Self {
            bytes,
            truncated: false,
        }
    }

    pub fn as_bytes(&self) -> &[u8; RECORD_LEN] {
        &self.bytes
    }

    /// Whether the source was shorter than a full record.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub(crate) fn message_type_code(&self) -> u8 {
        self.bytes[MESSAGE_TYPE_OFFSET]
    }

    pub(crate) fn side_code(&self) -> u8 {
        self.bytes[SIDE_OFFSET]
    }

    pub(crate) fn symbol_bytes(&self) -> [u8; SYMBOL_LEN] {
        let mut symbol = [0u8; SYMBOL_LEN];
        symbol.copy_from_slice(&self.bytes[SYMBOL_OFFSET..SYMBOL_OFFSET + SYMBOL_LEN]);
        symbol
    }

    pub(crate) fn price_raw(&self) -> u64 {
        let mut price = [0u8; 8];
        price.copy_from_slice(&self.bytes[PRICE_OFFSET..PRICE_OFFSET + 8]);
        u64::from_be_bytes(price)
    }

    pub(crate) fn quantity_raw(&self) -> u32 {
        let mut quantity = [0u8; 4];
        quantity.copy_from_slice(&self.bytes[QUANTITY_OFFSET..QUANTITY_OFFSET + 4]);
        u32::from_be_bytes(quantity)
    }
}

/// Normalized decoder output consumed by the order book engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedRecord {
    pub symbol: Symbol,
    pub price: Price,
    pub quantity: Quantity,
    pub side: Side,
    pub message_type: MessageType,
    /// Set once every field has been extracted
    pub valid: bool,
}

impl DecodedRecord {
    /// A record with no fields decoded and `valid == false`.
    pub const EMPTY: DecodedRecord = DecodedRecord {
        symbol: Symbol::EMPTY,
        price: Price::ZERO,
        quantity: 0,
        side: Side::Bid,
        message_type: MessageType::Undefined,
        valid: false,
    };

    /// A fully decoded order update. Mostly useful for feeding the engine directly.
    pub fn new(symbol: Symbol, price: Price, quantity: Quantity, side: Side) -> Self {
        Self {
            symbol,
            price,
            quantity,
            side,
            message_type: MessageType::Order,
            valid: true,
        }
    }

    pub fn with_message_type(mut self, message_type: MessageType) -> Self {
        self.message_type = message_type;
        self
    }
}

impl Default for DecodedRecord {
    fn default() -> Self {
        DecodedRecord::EMPTY
    }
}
