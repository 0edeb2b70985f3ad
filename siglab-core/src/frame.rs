//! IndicatorFrame: every derived series the filter set reads, computed once
//! per candle series and index-aligned with it.
//!
//! Warmup rows are stored as `f64::NAN` internally (the indicator
//! convention) but all accessors return `Option<f64>`, with `None` for
//! undefined rows. An undefined value therefore cannot reach an entry
//! decision without an explicit unwrap, which the decision layer never
//! performs.
//!
//! Short input is not an error: rows without enough history are simply
//! undefined, and `warmup_bars()` tells callers where trustworthy data
//! begins.

use crate::config::IndicatorConfig;
use crate::domain::Candle;
use crate::indicators::{Atr, Ema, Indicator, Macd, Rsi, VolumeSma, Vwap};

#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    len: usize,
    warmup: usize,
    ema_fast: Vec<f64>,
    ema_slow: Vec<f64>,
    ema_trend: Vec<f64>,
    rsi: Vec<f64>,
    atr: Vec<f64>,
    macd_line: Vec<f64>,
    macd_signal: Vec<f64>,
    vwap: Vec<f64>,
    volume_avg: Vec<f64>,
}

impl IndicatorFrame {
    /// Compute all configured series over `candles`.
    ///
    /// Only causally-prior data feeds each row; the truncation-invariance
    /// tests hold for every series here.
    pub fn compute(candles: &[Candle], config: &IndicatorConfig) -> Self {
        let rsi = Rsi::new(config.rsi_period);
        let atr = Atr::new(config.atr_period);
        let macd_line = Macd::line(config.macd_fast, config.macd_slow, config.macd_signal);
        let macd_signal = Macd::signal(config.macd_fast, config.macd_slow, config.macd_signal);
        let volume_avg = VolumeSma::new(config.volume_avg_period);

        // EMAs are seeded from the first value and defined from index 0;
        // their seed bias does not gate the warmup index.
        let warmup = rsi
            .lookback()
            .max(atr.lookback())
            .max(macd_signal.lookback())
            .max(volume_avg.lookback());

        Self {
            len: candles.len(),
            warmup,
            ema_fast: Ema::new(config.ema_fast).compute(candles),
            ema_slow: Ema::new(config.ema_slow).compute(candles),
            ema_trend: Ema::new(config.ema_trend).compute(candles),
            rsi: rsi.compute(candles),
            atr: atr.compute(candles),
            macd_line: macd_line.compute(candles),
            macd_signal: macd_signal.compute(candles),
            vwap: Vwap::from_session(config.vwap_session).compute(candles),
            volume_avg: volume_avg.compute(candles),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First index at which every configured series is defined and past
    /// its seed window.
    pub fn warmup_bars(&self) -> usize {
        self.warmup
    }

    fn defined(series: &[f64], index: usize) -> Option<f64> {
        series.get(index).copied().filter(|v| v.is_finite())
    }

    pub fn ema_fast(&self, index: usize) -> Option<f64> {
        Self::defined(&self.ema_fast, index)
    }

    pub fn ema_slow(&self, index: usize) -> Option<f64> {
        Self::defined(&self.ema_slow, index)
    }

    pub fn ema_trend(&self, index: usize) -> Option<f64> {
        Self::defined(&self.ema_trend, index)
    }

    pub fn rsi(&self, index: usize) -> Option<f64> {
        Self::defined(&self.rsi, index)
    }

    /// Raw RSI series for windowed scans (pivot divergence). Warmup rows
    /// are NaN; point reads should prefer `rsi()`.
    pub fn rsi_series(&self) -> &[f64] {
        &self.rsi
    }

    pub fn atr(&self, index: usize) -> Option<f64> {
        Self::defined(&self.atr, index)
    }

    pub fn macd_line(&self, index: usize) -> Option<f64> {
        Self::defined(&self.macd_line, index)
    }

    pub fn macd_signal(&self, index: usize) -> Option<f64> {
        Self::defined(&self.macd_signal, index)
    }

    pub fn vwap(&self, index: usize) -> Option<f64> {
        Self::defined(&self.vwap, index)
    }

    pub fn volume_avg(&self, index: usize) -> Option<f64> {
        Self::defined(&self.volume_avg, index)
    }
}
