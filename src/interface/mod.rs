//! Caller-facing boundary: submit updates, query books and status.

mod gateway;
mod metrics;

pub use gateway::{BookQuote, IngestSummary, StatusReport, SubmitOutcome, TradingInterface};
pub use metrics::LatencyStats;
