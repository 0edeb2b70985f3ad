//! Candle, the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// OHLCV candle for a single instrument and timeframe.
///
/// Immutable once produced by the data source. Volume is `f64` because
/// crypto venues report fractional base-asset volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Returns true if any OHLCV field is NaN.
    pub fn is_void(&self) -> bool {
        self.open.is_nan()
            || self.high.is_nan()
            || self.low.is_nan()
            || self.close.is_nan()
            || self.volume.is_nan()
    }

    /// Basic OHLC sanity check: the high/low range contains open and close,
    /// and prices are positive.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
            && self.volume >= 0.0
    }

    /// Typical price (H+L+C)/3, the VWAP input.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Candle body as a fraction of the full range.
    /// `None` on zero-range bars (high == low).
    pub fn body_ratio(&self) -> Option<f64> {
        let range = self.high - self.low;
        if range <= 0.0 {
            return None;
        }
        Some((self.close - self.open).abs() / range)
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// Validate a candle series once at ingestion.
///
/// Checks: non-empty, every row sane, timestamps strictly increasing with
/// no duplicates. Downstream code indexes freely after this.
pub fn validate_series(candles: &[Candle]) -> Result<(), DataError> {
    if candles.is_empty() {
        return Err(DataError::EmptySeries);
    }
    for (index, candle) in candles.iter().enumerate() {
        if !candle.is_sane() {
            return Err(DataError::InsaneCandle {
                index,
                timestamp: candle.timestamp,
            });
        }
    }
    for pair in candles.windows(2) {
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(DataError::NonMonotonicTimestamps {
                timestamp: pair[1].timestamp,
            });
        }
    }
    Ok(())
}
