use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV row as stored and transported by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerRecord {
    pub datetime: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl TickerRecord {
    /// Strip the record down to what the backtest engine consumes.
    pub fn price_point(&self) -> PricePoint {
        PricePoint {
            timestamp: self.datetime,
            close: self.close,
        }
    }
}

/// Engine input: a timestamped close price.
///
/// The engine assumes the sequence it receives is sorted ascending by
/// timestamp with no duplicates; the storage layer guarantees this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}
