//! Strategy configuration.
//!
//! Every knob the strategy exposes, collected into one validated,
//! serializable surface. Components receive these structs by value through
//! their constructors; nothing reads process-global state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::filters;

/// Indicator periods and session settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub ema_trend: usize,
    pub rsi_period: usize,
    pub atr_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub volume_avg_period: usize,
    pub vwap_session: VwapSession,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ema_fast: 20,
            ema_slow: 50,
            ema_trend: 200,
            rsi_period: 14,
            atr_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            volume_avg_period: 20,
            vwap_session: VwapSession::Continuous,
        }
    }
}

/// VWAP session boundary. `Continuous` accumulates over the whole series;
/// `Daily` resets at each UTC date change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VwapSession {
    Continuous,
    Daily,
}

/// An inclusive-exclusive RSI acceptance band (lower < rsi < upper).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiBand {
    pub lower: f64,
    pub upper: f64,
}

impl RsiBand {
    pub fn contains(&self, rsi: f64) -> bool {
        self.lower < rsi && rsi < self.upper
    }
}

/// Entry filter thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Weighted score required for a pass verdict. Each condition carries
    /// weight 1.0 unless overridden in `weights`.
    pub required_score: f64,
    /// Volume must exceed this multiple of the rolling volume average.
    pub min_volume_multiplier: f64,
    /// ATR as a fraction of price must exceed this floor.
    pub min_atr_ratio: f64,
    /// Candle body as a fraction of its range must exceed this.
    pub min_body_ratio: f64,
    pub long_rsi_band: RsiBand,
    pub short_rsi_band: RsiBand,
    /// Neighbors on each side a bar must dominate to count as a pivot.
    pub pivot_span: usize,
    /// Maximum bar distance between compared pivots (and from the newest
    /// pivot to the evaluation bar) for divergence.
    pub divergence_lookback: usize,
    /// Per-condition weight overrides, keyed by condition name.
    pub weights: BTreeMap<String, f64>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            required_score: 7.0,
            min_volume_multiplier: 1.2,
            min_atr_ratio: 0.002,
            min_body_ratio: 0.5,
            long_rsi_band: RsiBand {
                lower: 35.0,
                upper: 60.0,
            },
            short_rsi_band: RsiBand {
                lower: 40.0,
                upper: 65.0,
            },
            pivot_span: 5,
            divergence_lookback: 30,
            weights: BTreeMap::new(),
        }
    }
}

/// Stop/target placement parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// ATR multiple for the volatility stop.
    pub atr_multiplier: f64,
    /// Target distance as a multiple of the entry-to-stop risk.
    pub risk_reward_ratio: f64,
    /// Plans below this achieved reward:risk are rejected.
    pub min_acceptable_rr: f64,
    /// Bars of trailing history used for support/resistance.
    pub structure_lookback: usize,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            atr_multiplier: 1.5,
            risk_reward_ratio: 2.0,
            min_acceptable_rr: 1.8,
            structure_lookback: 10,
        }
    }
}

/// Entry decision parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Stand-in for an external model score. Constant by design: no model
    /// is fitted here, so the value is surfaced as configuration instead of
    /// being buried in code.
    pub confidence: f64,
    /// Entries require `confidence >= min_confidence`.
    pub min_confidence: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            confidence: 0.75,
            min_confidence: 0.7,
        }
    }
}

/// Resolution when a single bar's range spans both the stop and the target.
/// OHLC data cannot reveal which level traded first; the chosen policy is
/// applied uniformly across the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SameBarPolicy {
    /// Conservative: assume the stop filled first.
    StopFirst,
    /// Optimistic: assume the target filled first.
    TargetFirst,
}

/// Trade lifecycle parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Force exit at the close once a position has been held this many bars.
    pub max_hold_bars: usize,
    /// Commission per side, as a fraction of price; charged on entry and exit.
    pub commission_rate: f64,
    pub initial_balance: f64,
    pub same_bar_policy: SameBarPolicy,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_hold_bars: 96,
            commission_rate: 0.001,
            initial_balance: 10_000.0,
            same_bar_policy: SameBarPolicy::StopFirst,
        }
    }
}

/// The full strategy parameter surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub indicators: IndicatorConfig,
    pub filters: FilterConfig,
    pub risk: RiskConfig,
    pub decision: DecisionConfig,
    pub simulator: SimulatorConfig,
}

impl StrategyConfig {
    /// Reject contradictory settings before any simulation runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ind = &self.indicators;
        for (name, value) in [
            ("ema_fast", ind.ema_fast),
            ("ema_slow", ind.ema_slow),
            ("ema_trend", ind.ema_trend),
            ("rsi_period", ind.rsi_period),
            ("atr_period", ind.atr_period),
            ("macd_fast", ind.macd_fast),
            ("macd_slow", ind.macd_slow),
            ("macd_signal", ind.macd_signal),
            ("volume_avg_period", ind.volume_avg_period),
        ] {
            if value == 0 {
                return Err(ConfigError::BadPeriod { name, value });
            }
        }
        if !(ind.ema_fast < ind.ema_slow && ind.ema_slow < ind.ema_trend) {
            return Err(ConfigError::EmaOrdering {
                fast: ind.ema_fast,
                slow: ind.ema_slow,
                trend: ind.ema_trend,
            });
        }
        if ind.macd_fast >= ind.macd_slow {
            return Err(ConfigError::MacdOrdering {
                fast: ind.macd_fast,
                slow: ind.macd_slow,
            });
        }

        let flt = &self.filters;
        let achievable = filters::max_achievable_score(flt);
        if flt.required_score > achievable {
            return Err(ConfigError::UnreachableScore {
                required: flt.required_score,
                achievable,
            });
        }
        if flt.min_volume_multiplier <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "min_volume_multiplier",
                value: flt.min_volume_multiplier,
            });
        }
        if flt.min_atr_ratio <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "min_atr_ratio",
                value: flt.min_atr_ratio,
            });
        }
        if !(0.0..=1.0).contains(&flt.min_body_ratio) {
            return Err(ConfigError::OutOfUnitRange {
                name: "min_body_ratio",
                value: flt.min_body_ratio,
            });
        }
        for band in [flt.long_rsi_band, flt.short_rsi_band] {
            if !(0.0 <= band.lower && band.lower < band.upper && band.upper <= 100.0) {
                return Err(ConfigError::BadRsiBand {
                    lower: band.lower,
                    upper: band.upper,
                });
            }
        }
        if flt.pivot_span == 0 {
            return Err(ConfigError::BadPeriod {
                name: "pivot_span",
                value: flt.pivot_span,
            });
        }
        if flt.divergence_lookback <= flt.pivot_span {
            return Err(ConfigError::BadDivergenceWindow {
                lookback: flt.divergence_lookback,
                span: flt.pivot_span,
            });
        }

        let risk = &self.risk;
        for (name, value) in [
            ("atr_multiplier", risk.atr_multiplier),
            ("risk_reward_ratio", risk.risk_reward_ratio),
            ("min_acceptable_rr", risk.min_acceptable_rr),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if risk.structure_lookback == 0 {
            return Err(ConfigError::BadPeriod {
                name: "structure_lookback",
                value: risk.structure_lookback,
            });
        }

        let decision = &self.decision;
        for (name, value) in [
            ("confidence", decision.confidence),
            ("min_confidence", decision.min_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfUnitRange { name, value });
            }
        }

        let sim = &self.simulator;
        if sim.max_hold_bars == 0 {
            return Err(ConfigError::ZeroMaxHold);
        }
        if sim.commission_rate < 0.0 {
            return Err(ConfigError::NegativeCommission(sim.commission_rate));
        }
        if sim.initial_balance <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "initial_balance",
                value: sim.initial_balance,
            });
        }

        Ok(())
    }
}
