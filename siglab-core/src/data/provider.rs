//! Candle provider trait.
//!
//! The engine never fetches data itself. Exchange REST clients, CSV
//! replayers, and mock generators all implement this trait outside the
//! core; the engine accepts any of them and knows nothing about their
//! transport.

use chrono::{DateTime, Utc};

use crate::domain::Candle;
use crate::error::DataError;

pub trait CandleProvider {
    /// Fetch candles for `symbol` at `timeframe`, covering [start, end).
    ///
    /// The returned series must satisfy `validate_series`: ordered,
    /// duplicate-free, sane OHLC.
    fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Candle>, DataError>;
}

/// Parse a timeframe token like "15m", "1h", "4h", "1d" into a duration.
pub fn parse_timeframe(timeframe: &str) -> Option<chrono::Duration> {
    let (value, unit) = timeframe.split_at(timeframe.len().checked_sub(1)?);
    let value: i64 = value.parse().ok()?;
    if value <= 0 {
        return None;
    }
    match unit {
        "m" => Some(chrono::Duration::minutes(value)),
        "h" => Some(chrono::Duration::hours(value)),
        "d" => Some(chrono::Duration::days(value)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_timeframes() {
        assert_eq!(parse_timeframe("15m"), Some(chrono::Duration::minutes(15)));
        assert_eq!(parse_timeframe("1h"), Some(chrono::Duration::hours(1)));
        assert_eq!(parse_timeframe("4h"), Some(chrono::Duration::hours(4)));
        assert_eq!(parse_timeframe("1d"), Some(chrono::Duration::days(1)));
    }

    #[test]
    fn rejects_malformed_timeframes() {
        assert_eq!(parse_timeframe(""), None);
        assert_eq!(parse_timeframe("h"), None);
        assert_eq!(parse_timeframe("15x"), None);
        assert_eq!(parse_timeframe("-5m"), None);
        assert_eq!(parse_timeframe("0m"), None);
    }
}
