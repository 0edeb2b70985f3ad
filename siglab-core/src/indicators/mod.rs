//! Concrete indicator implementations.
//!
//! Indicators are pure functions: candle history in, numeric series out,
//! index-aligned with the input. Rows where a rolling window has
//! insufficient history hold `f64::NAN`; the `IndicatorFrame` accessors
//! translate those to `None` so undefined values cannot leak into
//! decisions.
//!
//! Look-ahead guard: no value at bar t may depend on data from bar t+1 or
//! later. Every indicator passes the truncated-vs-full series test.

pub mod atr;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod volume;
pub mod vwap;

pub use atr::{true_range, Atr};
pub use ema::{ema_of_series, Ema};
pub use macd::{Macd, MacdBand};
pub use rsi::Rsi;
pub use volume::VolumeSma;
pub use vwap::Vwap;

use crate::domain::Candle;

/// Trait for indicators.
///
/// `compute` returns a series of the same length as the input; warmup rows
/// are `f64::NAN`. `lookback` is the number of bars consumed before the
/// first trustworthy value.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g. "ema_20", "atr_14").
    fn name(&self) -> &str;

    /// Bars needed before the indicator produces trustworthy output.
    fn lookback(&self) -> usize;

    /// Compute the indicator over the entire candle series.
    fn compute(&self, candles: &[Candle]) -> Vec<f64>;
}

/// Create synthetic candles from close prices for testing.
///
/// Plausible OHLV: open = previous close, high/low bracket the body by 1.0,
/// volume constant 1000.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<Candle> {
    use chrono::TimeZone;
    let base = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Candle {
                timestamp: base + chrono::Duration::minutes(15 * i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
