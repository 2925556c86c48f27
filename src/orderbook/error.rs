//! Order book error types

use std::fmt;

/// Errors that can occur within the decoder, the order book engine or the trading interface.
///
/// Capacity rejections are not errors: they are reported through
/// [`UpdateOutcome`](super::UpdateOutcome) and the durable per-side full status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderBookError {
    /// A price could not be represented in fixed point
    InvalidPrice {
        /// The offending input, as text
        value: String,
        /// Why it was refused
        reason: &'static str,
    },

    /// A symbol is empty, too long or not printable ASCII
    InvalidSymbol {
        /// The offending input
        symbol: String,
        /// Why it was refused
        reason: &'static str,
    },

    /// No result is available yet; the caller should retry
    NotReady {
        /// What was not ready
        context: String,
    },

    /// Configuration values are out of range
    InvalidConfig {
        /// Description of the error
        message: String,
    },

    /// Operation not permitted
    InvalidOperation {
        /// Description of the error
        message: String,
    },

    /// JSON encoding or decoding failed
    Serialization {
        /// Description of the error
        message: String,
    },
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::InvalidPrice { value, reason } => {
                write!(f, "Invalid price {}: {}", value, reason)
            }
            OrderBookError::InvalidSymbol { symbol, reason } => {
                write!(f, "Invalid symbol {:?}: {}", symbol, reason)
            }
            OrderBookError::NotReady { context } => write!(f, "Not ready: {}", context),
            OrderBookError::InvalidConfig { message } => {
                write!(f, "Invalid configuration: {}", message)
            }
            OrderBookError::InvalidOperation { message } => {
                write!(f, "Invalid operation: {}", message)
            }
            OrderBookError::Serialization { message } => {
                write!(f, "Serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for OrderBookError {}

impl From<serde_json::Error> for OrderBookError {
    fn from(err: serde_json::Error) -> Self {
        OrderBookError::Serialization {
            message: err.to_string(),
        }
    }
}
