//! Engine configuration

use crate::OrderBookError;
use serde::{Deserialize, Serialize};

/// Default number of price level slots per side per instrument.
pub const DEFAULT_MAX_LEVELS: usize = 16;

/// Default depth for order book snapshots.
pub const DEFAULT_SNAPSHOT_DEPTH: usize = 10;

/// Largest slot count accepted. Best-price recompute is a linear scan, so
/// the bound keeps worst-case update latency small.
pub const MAX_SUPPORTED_LEVELS: usize = 4096;

/// Sizing for the order book engine. Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Capacity of each side of each book
    pub max_levels: usize,

    /// Depth used by snapshots when the caller does not pass one
    pub snapshot_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_levels: DEFAULT_MAX_LEVELS,
            snapshot_depth: DEFAULT_SNAPSHOT_DEPTH,
        }
    }
}

impl EngineConfig {
    /// Same configuration with a different per-side capacity.
    pub fn with_max_levels(mut self, max_levels: usize) -> Self {
        self.max_levels = max_levels;
        self
    }

    /// Same configuration with a different default snapshot depth.
    pub fn with_snapshot_depth(mut self, snapshot_depth: usize) -> Self {
        self.snapshot_depth = snapshot_depth;
        self
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<(), OrderBookError> {
        if self.max_levels == 0 {
            return Err(OrderBookError::InvalidConfig {
                message: "max_levels must be at least 1".to_string(),
            });
        }
        if self.max_levels > MAX_SUPPORTED_LEVELS {
            return Err(OrderBookError::InvalidConfig {
                message: format!(
                    "max_levels {} exceeds the supported maximum of {}",
                    self.max_levels, MAX_SUPPORTED_LEVELS
                ),
            });
        }
        if self.snapshot_depth == 0 {
            return Err(OrderBookError::InvalidConfig {
                message: "snapshot_depth must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, OrderBookError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
