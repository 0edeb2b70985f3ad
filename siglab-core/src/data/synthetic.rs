//! Deterministic synthetic candle series.
//!
//! A seeded random walk with configurable drift and volatility, used by
//! tests, benchmarks, and examples. Same seed, same series.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::Candle;
use crate::error::DataError;

use super::provider::{parse_timeframe, CandleProvider};

#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    seed: u64,
    start_price: f64,
    /// Per-bar drift as a fraction (e.g. 0.001 = +0.1% per bar).
    drift: f64,
    /// Per-bar noise amplitude as a fraction of price.
    volatility: f64,
    base_volume: f64,
}

impl SyntheticProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            start_price: 100.0,
            drift: 0.0,
            volatility: 0.01,
            base_volume: 1000.0,
        }
    }

    pub fn with_drift(mut self, drift: f64) -> Self {
        self.drift = drift;
        self
    }

    pub fn with_volatility(mut self, volatility: f64) -> Self {
        assert!(volatility >= 0.0, "volatility must be >= 0");
        self.volatility = volatility;
        self
    }

    pub fn with_start_price(mut self, price: f64) -> Self {
        assert!(price > 0.0, "start price must be > 0");
        self.start_price = price;
        self
    }

    /// Generate `n` candles starting at `start`, one per `step`.
    pub fn generate(&self, n: usize, start: DateTime<Utc>, step: chrono::Duration) -> Vec<Candle> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut candles = Vec::with_capacity(n);
        let mut prev_close = self.start_price;

        for i in 0..n {
            let noise: f64 = rng.gen_range(-1.0..1.0);
            let close = (prev_close * (1.0 + self.drift + self.volatility * noise)).max(0.01);
            let open = prev_close;
            let wick: f64 = if self.volatility > 0.0 {
                rng.gen_range(0.0..self.volatility)
            } else {
                0.0
            };
            let high = open.max(close) * (1.0 + wick);
            let low = (open.min(close) * (1.0 - wick)).max(0.005);
            let volume = self.base_volume * rng.gen_range(0.5..1.5);

            candles.push(Candle {
                timestamp: start + step * i as i32,
                open,
                high,
                low,
                close,
                volume,
            });
            prev_close = close;
        }

        candles
    }
}

impl CandleProvider for SyntheticProvider {
    fn fetch_candles(
        &self,
        _symbol: &str,
        timeframe: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Candle>, DataError> {
        let step = parse_timeframe(timeframe)
            .ok_or_else(|| DataError::Provider(format!("unknown timeframe: {timeframe}")))?;
        let span = end - start;
        if span <= chrono::Duration::zero() {
            return Err(DataError::Provider("end must be after start".into()));
        }
        let n = (span.num_seconds() / step.num_seconds().max(1)) as usize;
        Ok(self.generate(n, start, step))
    }
}
