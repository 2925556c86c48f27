use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::orderbook::OrderBookError;

/// Width of a symbol in bytes, both in memory and on the wire.
pub const SYMBOL_LEN: usize = 8;

/// Fixed-width instrument identifier: ASCII, NUL padded on the right.
///
/// Symbols are `Copy` and hash by their raw bytes, so they key book lookups
/// without allocating.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol([u8; SYMBOL_LEN]);

impl Symbol {
    /// The all-NUL symbol, used for records that have not been decoded yet.
    pub const EMPTY: Symbol = Symbol([0; SYMBOL_LEN]);

    /// Build a symbol from text. It must be non-empty printable ASCII of at most [`SYMBOL_LEN`] bytes.
    pub fn new(symbol: &str) -> Result<Self, OrderBookError> {
        let invalid = |reason| OrderBookError::InvalidSymbol {
            symbol: symbol.to_string(),
            reason,
        };

        if symbol.is_empty() {
            return Err(invalid("empty"));
        }
        if symbol.len() > SYMBOL_LEN {
            return Err(invalid("longer than 8 bytes"));
        }
        if !symbol.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(invalid("not printable ASCII"));
        }

        let mut bytes = [0u8; SYMBOL_LEN];
        bytes[..symbol.len()].copy_from_slice(symbol.as_bytes());
        Ok(Symbol(bytes))
    }

    /// Take raw wire bytes as-is. No validation is applied.
    pub const fn from_bytes(bytes: [u8; SYMBOL_LEN]) -> Self {
        Symbol(bytes)
    }

    /// The padded raw bytes.
    pub const fn as_bytes(&self) -> &[u8; SYMBOL_LEN] {
        &self.0
    }

    /// The bytes up to the first NUL.
    pub fn trimmed(&self) -> &[u8] {
        let len = self.0.iter().position(|&b| b == 0).unwrap_or(SYMBOL_LEN);
        &self.0[..len]
    }

    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.trimmed()))
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", String::from_utf8_lossy(self.trimmed()))
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Symbol::EMPTY
    }
}

impl FromStr for Symbol {
    type Err = OrderBookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::new(s)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = OrderBookError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Symbol::new(value)
    }
}

impl Symbol {
    /// Whether the symbol can be rebuilt from its text with [`Symbol::new`].
    fn is_printable(&self) -> bool {
        let text = self.trimmed();
        !text.is_empty()
            && text.iter().all(|b| b.is_ascii_graphic())
            && self.0[text.len()..].iter().all(|&b| b == 0)
    }
}

/// Printable symbols serialize as text. Anything else taken from the wire
/// serializes as its 8 raw bytes so it reads back unchanged.
impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_printable() {
            serializer.serialize_str(&self.to_string())
        } else {
            self.0.serialize(serializer)
        }
    }
}

struct SymbolVisitor;

impl<'de> Visitor<'de> for SymbolVisitor {
    type Value = Symbol;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a symbol string or {} raw bytes", SYMBOL_LEN)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Symbol, E> {
        Symbol::new(value).map_err(E::custom)
    }

    fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Symbol, E> {
        let bytes: [u8; SYMBOL_LEN] = value
            .try_into()
            .map_err(|_| E::invalid_length(value.len(), &self))?;
        Ok(Symbol(bytes))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Symbol, A::Error> {
        let mut bytes = [0u8; SYMBOL_LEN];
        for (index, byte) in bytes.iter_mut().enumerate() {
            *byte = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(index, &self))?;
        }
        if seq.next_element::<u8>()?.is_some() {
            return Err(de::Error::invalid_length(SYMBOL_LEN + 1, &self));
        }
        Ok(Symbol(bytes))
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SymbolVisitor)
    }
}
