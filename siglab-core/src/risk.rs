//! Risk plans: ATR- and structure-based stop/target placement.
//!
//! The stop goes to the wider of the ATR envelope and the local
//! support/resistance shelf; the target is a fixed multiple of the
//! entry-to-stop risk. A plan whose stop lands on the wrong side of entry
//! (support above a long entry, resistance below a short entry) is marked
//! unacceptable rather than producing a negative or undefined ratio.

use serde::{Deserialize, Serialize};

use crate::config::RiskConfig;
use crate::domain::{Candle, Side};
use crate::frame::IndicatorFrame;

/// Stop/target levels for a prospective entry, fixed for the life of the
/// position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPlan {
    pub stop_loss: f64,
    pub take_profit: f64,
    pub risk_reward_ratio: f64,
    pub acceptable: bool,
}

impl RiskPlan {
    /// A rejected plan; levels are zeroed and must not be traded.
    pub fn unacceptable() -> Self {
        Self {
            stop_loss: 0.0,
            take_profit: 0.0,
            risk_reward_ratio: 0.0,
            acceptable: false,
        }
    }
}

/// Derives stop/target plans from the current bar's indicators and a short
/// structure lookback.
pub struct RiskSizer {
    config: RiskConfig,
}

impl RiskSizer {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Build a plan for entering at `entry` on bar `index`.
    ///
    /// Uses only bars 0..=index. An undefined ATR yields an unacceptable
    /// plan, never a panic.
    pub fn plan(
        &self,
        candles: &[Candle],
        frame: &IndicatorFrame,
        index: usize,
        side: Side,
        entry: f64,
    ) -> RiskPlan {
        let atr = match frame.atr(index) {
            Some(atr) if atr > 0.0 => atr,
            _ => return RiskPlan::unacceptable(),
        };
        if !(entry.is_finite() && entry > 0.0) || index >= candles.len() {
            return RiskPlan::unacceptable();
        }

        let start = index.saturating_sub(self.config.structure_lookback.saturating_sub(1));
        let window = &candles[start..=index];
        let cfg = &self.config;

        let (stop_loss, take_profit) = match side {
            Side::Long => {
                let support = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
                let stop = (entry - cfg.atr_multiplier * atr).min(support * 0.99);
                if stop >= entry {
                    return RiskPlan::unacceptable();
                }
                let target = entry + cfg.risk_reward_ratio * (entry - stop);
                (stop, target)
            }
            Side::Short => {
                let resistance = window
                    .iter()
                    .map(|c| c.high)
                    .fold(f64::NEG_INFINITY, f64::max);
                let stop = (entry + cfg.atr_multiplier * atr).max(resistance * 1.01);
                if stop <= entry {
                    return RiskPlan::unacceptable();
                }
                let target = entry - cfg.risk_reward_ratio * (stop - entry);
                (stop, target)
            }
        };

        let risk = (entry - stop_loss).abs();
        let reward = (take_profit - entry).abs();
        if risk <= f64::EPSILON * entry {
            return RiskPlan::unacceptable();
        }
        let risk_reward_ratio = reward / risk;

        RiskPlan {
            stop_loss,
            take_profit,
            risk_reward_ratio,
            acceptable: risk_reward_ratio >= cfg.min_acceptable_rr,
        }
    }
}
