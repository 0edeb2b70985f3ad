//! Rolling volume average, the baseline for volume-spike detection.
//!
//! Simple mean of the trailing `period` volumes, current bar included.
//! Lookback: period - 1.

use crate::domain::Candle;

use super::Indicator;

#[derive(Debug, Clone)]
pub struct VolumeSma {
    period: usize,
    name: String,
}

impl VolumeSma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "volume average period must be >= 1");
        Self {
            period,
            name: format!("volume_sma_{period}"),
        }
    }
}

impl Indicator for VolumeSma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let n = candles.len();
        let p = self.period;
        let mut result = vec![f64::NAN; n];

        if n < p {
            return result;
        }

        let mut sum: f64 = candles[..p].iter().map(|c| c.volume).sum();
        result[p - 1] = sum / p as f64;

        for i in p..n {
            sum += candles[i].volume - candles[i - p].volume;
            result[i] = sum / p as f64;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_candles, DEFAULT_EPSILON};

    #[test]
    fn volume_sma_known_values() {
        let mut candles = make_candles(&[100.0; 5]);
        for (i, c) in candles.iter_mut().enumerate() {
            c.volume = (i as f64 + 1.0) * 100.0; // 100..500
        }
        let result = VolumeSma::new(3).compute(&candles);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 200.0, DEFAULT_EPSILON);
        assert_approx(result[3], 300.0, DEFAULT_EPSILON);
        assert_approx(result[4], 400.0, DEFAULT_EPSILON);
    }

    #[test]
    fn volume_sma_short_input_all_nan() {
        let candles = make_candles(&[100.0, 101.0]);
        let result = VolumeSma::new(5).compute(&candles);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn volume_sma_lookback() {
        assert_eq!(VolumeSma::new(20).lookback(), 19);
    }
}
