//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|), with
//! TR[0] = high-low (no previous close). The ATR seed is the mean of the
//! first `period` true ranges, then Wilder smoothing with alpha = 1/period.
//! Lookback: period - 1.

use crate::domain::Candle;

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    name: String,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            name: format!("atr_{period}"),
        }
    }
}

/// Compute the True Range series.
pub fn true_range(candles: &[Candle]) -> Vec<f64> {
    let n = candles.len();
    let mut tr = vec![f64::NAN; n];

    if n == 0 {
        return tr;
    }

    let h = candles[0].high;
    let l = candles[0].low;
    if h.is_nan() || l.is_nan() {
        tr[0] = f64::NAN;
    } else {
        tr[0] = h - l;
    }

    for i in 1..n {
        let h = candles[i].high;
        let l = candles[i].low;
        let pc = candles[i - 1].close;
        if h.is_nan() || l.is_nan() || pc.is_nan() {
            tr[i] = f64::NAN;
        } else {
            tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
        }
    }

    tr
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let n = candles.len();
        let p = self.period;
        let tr = true_range(candles);
        let mut result = vec![f64::NAN; n];

        if n < p {
            return result;
        }

        let mut sum = 0.0;
        for &v in &tr[..p] {
            if v.is_nan() {
                return result;
            }
            sum += v;
        }
        let seed = sum / p as f64;
        result[p - 1] = seed;

        let mut prev = seed;
        for i in p..n {
            if tr[i].is_nan() {
                return result;
            }
            let atr = (prev * (p as f64 - 1.0) + tr[i]) / p as f64;
            result[i] = atr;
            prev = atr;
        }

        result
    }
}
