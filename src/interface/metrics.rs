use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Running latency counters for submitted updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub count: u64,
    pub total_ns: u64,
    pub min_ns: u64,
    pub max_ns: u64,
}

impl LatencyStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.min_ns = if self.count == 0 {
            nanos
        } else {
            self.min_ns.min(nanos)
        };
        self.max_ns = self.max_ns.max(nanos);
        self.total_ns = self.total_ns.saturating_add(nanos);
        self.count += 1;
    }

    /// Mean latency in nanoseconds, zero before the first sample.
    pub fn mean_ns(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_ns as f64 / self.count as f64
        }
    }

    /// Updates per second of processing time, zero before the first sample.
    pub fn throughput_per_sec(&self) -> u64 {
        if self.total_ns == 0 {
            0
        } else {
            (self.count as f64 * 1e9 / self.total_ns as f64) as u64
        }
    }
}
