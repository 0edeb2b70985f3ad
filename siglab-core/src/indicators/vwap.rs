//! Volume-Weighted Average Price (VWAP).
//!
//! Cumulative (typical price * volume) / cumulative volume. The session
//! boundary is caller-specified: continuous accumulation over the whole
//! series, or a reset on each UTC date change. A window with zero
//! cumulative volume leaves the row undefined.

use chrono::Datelike;

use crate::config::VwapSession;
use crate::domain::Candle;

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Vwap {
    session: VwapSession,
    name: &'static str,
}

impl Vwap {
    pub fn continuous() -> Self {
        Self {
            session: VwapSession::Continuous,
            name: "vwap",
        }
    }

    pub fn daily() -> Self {
        Self {
            session: VwapSession::Daily,
            name: "vwap_daily",
        }
    }

    pub fn from_session(session: VwapSession) -> Self {
        match session {
            VwapSession::Continuous => Self::continuous(),
            VwapSession::Daily => Self::daily(),
        }
    }
}

impl Indicator for Vwap {
    fn name(&self) -> &str {
        self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let mut result = vec![f64::NAN; candles.len()];
        let mut cum_pv = 0.0;
        let mut cum_vol = 0.0;

        for (i, candle) in candles.iter().enumerate() {
            if self.session == VwapSession::Daily && i > 0 {
                let prev = candles[i - 1].timestamp;
                let curr = candle.timestamp;
                if prev.num_days_from_ce() != curr.num_days_from_ce() {
                    cum_pv = 0.0;
                    cum_vol = 0.0;
                }
            }

            let typical = candle.typical_price();
            if typical.is_nan() || candle.volume.is_nan() {
                continue;
            }
            cum_pv += typical * candle.volume;
            cum_vol += candle.volume;

            if cum_vol > 0.0 {
                result[i] = cum_pv / cum_vol;
            }
        }

        result
    }
}
