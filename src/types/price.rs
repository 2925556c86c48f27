//! Fixed-point price representation.
//!
//! Prices are stored as unsigned integers scaled by 10^6, so `180.55` is held as
//! `180_550_000`. Every conversion into the fixed-point domain truncates toward
//! zero; digits below the sixth fractional place are dropped, never rounded.

use crate::orderbook::OrderBookError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of fractional decimal digits carried by a [`Price`].
pub const PRICE_DECIMALS: u32 = 6;

/// Scale factor between a decimal price and its fixed-point representation.
pub const PRICE_SCALE: u64 = 1_000_000;

/// A price in fixed-point units of 10^-6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// The zero price.
    pub const ZERO: Price = Price(0);

    /// Wrap an already scaled value.
    pub const fn from_raw(raw: u64) -> Self {
        Price(raw)
    }

    /// The scaled integer value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Convert a host floating point price, truncating toward zero.
    ///
    /// Fails for NaN, infinities, values that truncate to a negative number,
    /// and values whose scaled form does not fit in 64 bits.
    pub fn from_f64(value: f64) -> Result<Self, OrderBookError> {
        if !value.is_finite() {
            return Err(OrderBookError::InvalidPrice {
                value: value.to_string(),
                reason: "not a finite number",
            });
        }

        let scaled = (value * PRICE_SCALE as f64).trunc();
        if scaled < 0.0 {
            return Err(OrderBookError::InvalidPrice {
                value: value.to_string(),
                reason: "negative",
            });
        }
        // u64::MAX as f64 rounds up to 2^64, which itself is out of range
        if scaled >= u64::MAX as f64 {
            return Err(OrderBookError::InvalidPrice {
                value: value.to_string(),
                reason: "out of range",
            });
        }

        Ok(Price(scaled as u64))
    }

    /// Convert an exact decimal, truncating toward zero.
    pub fn from_decimal(value: Decimal) -> Result<Self, OrderBookError> {
        let scaled = value
            .checked_mul(Decimal::from(PRICE_SCALE))
            .ok_or_else(|| OrderBookError::InvalidPrice {
                value: value.to_string(),
                reason: "out of range",
            })?
            .trunc();

        if scaled.is_zero() {
            return Ok(Price::ZERO);
        }
        if scaled.is_sign_negative() {
            return Err(OrderBookError::InvalidPrice {
                value: value.to_string(),
                reason: "negative",
            });
        }

        scaled
            .to_u64()
            .map(Price)
            .ok_or_else(|| OrderBookError::InvalidPrice {
                value: value.to_string(),
                reason: "out of range",
            })
    }

    /// Decimal value as a host floating point number.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / PRICE_SCALE as f64
    }

    /// Exact decimal value, normalized (no trailing zeros).
    pub fn to_decimal(self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.0), PRICE_DECIMALS).normalize()
    }

    /// Difference `self - other`, clamped at zero.
    pub fn saturating_sub(self, other: Price) -> Price {
        Price(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06}", self.0 / PRICE_SCALE, self.0 % PRICE_SCALE)
    }
}

impl FromStr for Price {
    type Err = OrderBookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim()).map_err(|_| OrderBookError::InvalidPrice {
            value: s.to_string(),
            reason: "not a decimal number",
        })?;
        Price::from_decimal(decimal)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.raw()
    }
}
