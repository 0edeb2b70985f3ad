//! Typed failures at the engine boundary.
//!
//! Configuration problems are rejected before any simulation runs; data
//! problems are rejected once at ingestion. Per-bar numeric edge cases are
//! never errors: indicators encode them as undefined values and the
//! decision layer treats undefined as "do not enter".

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Contradictory or out-of-range configuration, caught by
/// `StrategyConfig::validate()` before a run starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} period must be >= 1, got {value}")]
    BadPeriod { name: &'static str, value: usize },

    #[error("EMA periods must satisfy fast < slow < trend, got {fast}/{slow}/{trend}")]
    EmaOrdering {
        fast: usize,
        slow: usize,
        trend: usize,
    },

    #[error("MACD periods must satisfy fast < slow, got {fast}/{slow}")]
    MacdOrdering { fast: usize, slow: usize },

    #[error("required filter score {required} exceeds the achievable score {achievable}")]
    UnreachableScore { required: f64, achievable: f64 },

    #[error("{name} must be > 0, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must be within [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f64 },

    #[error("RSI band must satisfy 0 <= lower < upper <= 100, got {lower}..{upper}")]
    BadRsiBand { lower: f64, upper: f64 },

    #[error("commission_rate must be >= 0, got {0}")]
    NegativeCommission(f64),

    #[error("max_hold_bars must be >= 1")]
    ZeroMaxHold,

    #[error("divergence_lookback ({lookback}) must exceed pivot_span ({span})")]
    BadDivergenceWindow { lookback: usize, span: usize },
}

/// Malformed candle input, caught once by `validate_series` at ingestion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("candle series is empty")]
    EmptySeries,

    #[error("candle at index {index} ({timestamp}) has inconsistent OHLC")]
    InsaneCandle {
        index: usize,
        timestamp: DateTime<Utc>,
    },

    #[error("timestamps must be strictly increasing, violated at {timestamp}")]
    NonMonotonicTimestamps { timestamp: DateTime<Utc> },

    #[error("candle provider failure: {0}")]
    Provider(String),
}
