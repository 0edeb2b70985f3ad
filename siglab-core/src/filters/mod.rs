//! Entry filter evaluation.
//!
//! Ten conditions per direction, a weighted score, and a verdict against
//! the configured threshold. Long and short are evaluated independently at
//! every bar; a bar can pass both, and mutual exclusion belongs to the
//! decision maker. Conditions are pure predicates over the current bar, a
//! short trailing window, and the indicator frame; any undefined input
//! fails the condition rather than raising.

pub mod divergence;

use serde::Serialize;

use crate::config::FilterConfig;
use crate::domain::{Candle, Side};
use crate::frame::IndicatorFrame;

/// Condition names, in evaluation order. Weight overrides in
/// `FilterConfig::weights` are keyed by these.
pub const CONDITION_NAMES: [&str; 10] = [
    "trend_alignment",
    "price_vs_fast_ema",
    "volume_spike",
    "volatility_floor",
    "rsi_band",
    "candle_color",
    "body_dominance",
    "structure",
    "vwap_relation",
    "rsi_divergence",
];

/// Highest score a direction can achieve under this config.
pub fn max_achievable_score(config: &FilterConfig) -> f64 {
    CONDITION_NAMES.iter().map(|n| weight_of(config, n)).sum()
}

fn weight_of(config: &FilterConfig, name: &str) -> f64 {
    config.weights.get(name).copied().unwrap_or(1.0)
}

/// Outcome of evaluating one direction at one bar.
///
/// Recomputed independently at each bar; no state persists across bars
/// other than the indicator history itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterResult {
    pub direction: Side,
    /// Condition name and outcome, in `CONDITION_NAMES` order.
    pub conditions: Vec<(&'static str, bool)>,
    /// Weighted sum of the true conditions.
    pub score: f64,
    /// The configured pass threshold, echoed for reporting.
    pub required: f64,
}

impl FilterResult {
    pub fn passed(&self) -> bool {
        self.score >= self.required
    }

    /// Outcome of a single named condition, if evaluated.
    pub fn condition(&self, name: &str) -> Option<bool> {
        self.conditions
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }
}

/// Evaluates the configured condition set for both directions.
pub struct FilterEvaluator {
    config: FilterConfig,
}

impl FilterEvaluator {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Evaluate both directions at `index`.
    pub fn evaluate(
        &self,
        candles: &[Candle],
        frame: &IndicatorFrame,
        index: usize,
    ) -> (FilterResult, FilterResult) {
        (
            self.evaluate_direction(candles, frame, index, Side::Long),
            self.evaluate_direction(candles, frame, index, Side::Short),
        )
    }

    /// Evaluate one direction at `index`, using only bars 0..=index.
    /// An out-of-range index yields an all-false result.
    pub fn evaluate_direction(
        &self,
        candles: &[Candle],
        frame: &IndicatorFrame,
        index: usize,
        side: Side,
    ) -> FilterResult {
        let candle = match candles.get(index) {
            Some(candle) => candle,
            None => {
                return FilterResult {
                    direction: side,
                    conditions: CONDITION_NAMES.iter().map(|n| (*n, false)).collect(),
                    score: 0.0,
                    required: self.config.required_score,
                }
            }
        };
        let prev = index.checked_sub(1).map(|i| &candles[i]);
        let cfg = &self.config;

        let trend_alignment = match (
            frame.ema_fast(index),
            frame.ema_slow(index),
            frame.ema_trend(index),
        ) {
            (Some(fast), Some(slow), Some(trend)) => match side {
                Side::Long => fast > slow && slow > trend,
                Side::Short => fast < slow && slow < trend,
            },
            _ => false,
        };

        let price_vs_fast_ema = match frame.ema_fast(index) {
            Some(fast) => match side {
                Side::Long => candle.close > fast,
                Side::Short => candle.close < fast,
            },
            None => false,
        };

        let volume_spike = match frame.volume_avg(index) {
            Some(avg) if avg > 0.0 => candle.volume > cfg.min_volume_multiplier * avg,
            _ => false,
        };

        let volatility_floor = match frame.atr(index) {
            Some(atr) if candle.close > 0.0 => atr / candle.close > cfg.min_atr_ratio,
            _ => false,
        };

        let rsi_band = match frame.rsi(index) {
            Some(rsi) => match side {
                Side::Long => cfg.long_rsi_band.contains(rsi),
                Side::Short => cfg.short_rsi_band.contains(rsi),
            },
            None => false,
        };

        let candle_color = match side {
            Side::Long => candle.is_bullish(),
            Side::Short => candle.is_bearish(),
        };

        // Zero-range bars yield None and fail the condition
        let body_dominance = candle
            .body_ratio()
            .map(|ratio| ratio > cfg.min_body_ratio)
            .unwrap_or(false);

        let structure = match prev {
            Some(prev) => match side {
                Side::Long => candle.low > prev.low,
                Side::Short => candle.high < prev.high,
            },
            None => false,
        };

        let vwap_relation = match frame.vwap(index) {
            Some(vwap) => match side {
                Side::Long => candle.close > vwap,
                Side::Short => candle.close < vwap,
            },
            None => false,
        };

        let rsi_divergence = match side {
            Side::Long => divergence::bullish(candles, frame, index, cfg),
            Side::Short => divergence::bearish(candles, frame, index, cfg),
        };

        let outcomes = [
            trend_alignment,
            price_vs_fast_ema,
            volume_spike,
            volatility_floor,
            rsi_band,
            candle_color,
            body_dominance,
            structure,
            vwap_relation,
            rsi_divergence,
        ];

        let mut conditions = Vec::with_capacity(CONDITION_NAMES.len());
        let mut score = 0.0;
        for (name, outcome) in CONDITION_NAMES.iter().zip(outcomes) {
            if outcome {
                score += weight_of(cfg, name);
            }
            conditions.push((*name, outcome));
        }

        FilterResult {
            direction: side,
            conditions,
            score,
            required: cfg.required_score,
        }
    }
}
