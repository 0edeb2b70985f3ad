//! The bar-by-bar trade simulator: the one place mutable position state
//! lives.
//!
//! Per bar: (a) if a position is open, check stop, target, then timeout;
//! (b) if flat, evaluate the decision pipeline using only data up to and
//! including the current bar. Entries fill at the decision bar's close, so
//! a position opened at bar i sees its first exit check at bar i+1.
//! Re-entry on the bar a position closed is allowed.
//!
//! A bar that cannot be evaluated (non-finite candle data) is counted as an
//! anomaly and skipped; the run continues rather than aborting.

use log::{debug, warn};

use crate::config::StrategyConfig;
use crate::decision::{Action, DecisionMaker, PositionState};
use crate::domain::{Candle, ExitReason, Position, Side, Trade};
use crate::filters::FilterEvaluator;
use crate::frame::IndicatorFrame;
use crate::risk::{RiskPlan, RiskSizer};

use super::exits::{check_exit, ExitCheck};

/// Outcome of one simulated run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Completed trades, in exit order.
    pub trades: Vec<Trade>,
    pub bars_processed: usize,
    /// Bars skipped before decisions were trustworthy.
    pub warmup_bars: usize,
    /// Bars skipped because their data could not be evaluated.
    pub anomaly_count: usize,
}

/// Replays a candle series against the configured strategy.
pub struct TradeSimulator {
    config: StrategyConfig,
}

impl TradeSimulator {
    pub fn new(config: StrategyConfig) -> Self {
        Self { config }
    }

    /// Run the simulation. `candles` must be pre-validated and `frame`
    /// index-aligned with it.
    ///
    /// Every position closes by the final bar: stop, target, or timeout
    /// intrabar, and a forced timeout close at the last bar's close if the
    /// series ends first. No entry is taken on the final bar, since no bar
    /// would remain to exit on.
    pub fn run(&self, candles: &[Candle], frame: &IndicatorFrame) -> RunResult {
        let filters = FilterEvaluator::new(self.config.filters.clone());
        let sizer = RiskSizer::new(self.config.risk.clone());
        let decider = DecisionMaker::new(self.config.decision.clone());
        let warmup_bars = frame.warmup_bars();

        let mut position: Option<Position> = None;
        let mut trades = Vec::new();
        let mut anomaly_count = 0usize;

        for (index, candle) in candles.iter().enumerate() {
            if let Some(open) = &position {
                if index > open.entry_bar {
                    let held = open.bars_held(index);
                    if let Some(exit) = check_exit(open, candle, held, &self.config.simulator) {
                        let trade = self.close(open, &exit, candle, index);
                        debug!(
                            "exit {:?} at bar {index}: {:?} @ {:.4}, pnl {:.4}",
                            open.side, exit.reason, exit.price, trade.pnl
                        );
                        trades.push(trade);
                        position = None;
                    }
                }
            }

            if position.is_some() || index < warmup_bars {
                continue;
            }
            // The final bar has nothing left to exit on
            if index + 1 == candles.len() {
                continue;
            }
            if candle.is_void() {
                anomaly_count += 1;
                warn!("skipping bar {index}: non-finite candle data");
                continue;
            }

            let entry = candle.close;
            let (long, short) = filters.evaluate(candles, frame, index);
            let long_plan = sizer.plan(candles, frame, index, Side::Long, entry);
            let short_plan = sizer.plan(candles, frame, index, Side::Short, entry);

            let action = decider.decide(
                PositionState::Flat,
                &long,
                &long_plan,
                &short,
                &short_plan,
            );
            match action {
                Action::EnterLong => {
                    position = Some(self.open(Side::Long, index, entry, &long_plan, candle));
                }
                Action::EnterShort => {
                    position = Some(self.open(Side::Short, index, entry, &short_plan, candle));
                }
                Action::Hold => {}
            }
        }

        // Series ended with a position still open: force a timeout close at
        // the final bar so no position dangles.
        if let (Some(open), Some(last)) = (&position, candles.last()) {
            let index = candles.len() - 1;
            let exit = ExitCheck {
                price: last.close,
                reason: ExitReason::Timeout,
            };
            let trade = self.close(open, &exit, last, index);
            debug!(
                "forced close of {:?} at end of series, pnl {:.4}",
                open.side, trade.pnl
            );
            trades.push(trade);
        }

        RunResult {
            trades,
            bars_processed: candles.len(),
            warmup_bars,
            anomaly_count,
        }
    }

    fn open(
        &self,
        side: Side,
        entry_bar: usize,
        entry_price: f64,
        plan: &RiskPlan,
        candle: &Candle,
    ) -> Position {
        debug!(
            "enter {side:?} at bar {entry_bar}: entry {entry_price:.4}, stop {:.4}, target {:.4}",
            plan.stop_loss, plan.take_profit
        );
        Position {
            side,
            entry_bar,
            entry_price,
            stop_loss: plan.stop_loss,
            take_profit: plan.take_profit,
            opened_at: candle.timestamp,
        }
    }

    fn close(
        &self,
        position: &Position,
        exit: &ExitCheck,
        candle: &Candle,
        exit_bar: usize,
    ) -> Trade {
        let entry = position.entry_price;
        let gross = position.side.sign() * (exit.price - entry);
        let commission = self.config.simulator.commission_rate * (entry + exit.price);
        let pnl = gross - commission;

        Trade {
            side: position.side,
            entry_price: entry,
            exit_price: exit.price,
            entry_time: position.opened_at,
            exit_time: candle.timestamp,
            exit_reason: exit.reason,
            pnl,
            return_pct: pnl / entry * 100.0,
            bars_held: exit_bar - position.entry_bar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_candles;

    fn permissive_config() -> StrategyConfig {
        let mut config = StrategyConfig::default();
        config.filters.required_score = 0.0;
        config.simulator.max_hold_bars = 5;
        config
    }

    #[test]
    fn flat_series_enters_and_times_out() {
        let candles = make_candles(&[100.0; 60]);
        let config = permissive_config();
        let frame = IndicatorFrame::compute(&candles, &config.indicators);
        let result = TradeSimulator::new(config).run(&candles, &frame);

        // Entry at warmup bar close, timeout 5 bars later, repeated
        assert!(!result.trades.is_empty());
        let first = &result.trades[0];
        assert_eq!(first.exit_reason, ExitReason::Timeout);
        assert_eq!(first.bars_held, 5);
        assert_eq!(first.entry_time, candles[frame.warmup_bars()].timestamp);
    }

    #[test]
    fn exit_time_always_follows_entry_time() {
        let candles = make_candles(&[100.0; 60]);
        let config = permissive_config();
        let frame = IndicatorFrame::compute(&candles, &config.indicators);
        let result = TradeSimulator::new(config).run(&candles, &frame);
        for trade in &result.trades {
            assert!(trade.exit_time > trade.entry_time);
            assert!(trade.bars_held >= 1);
        }
    }

    #[test]
    fn commission_reduces_pnl() {
        let candles = make_candles(&[100.0; 60]);
        let mut config = permissive_config();
        config.simulator.commission_rate = 0.001;
        let frame = IndicatorFrame::compute(&candles, &config.indicators);
        let result = TradeSimulator::new(config).run(&candles, &frame);

        // Flat series timeouts exit at entry price: gross 0, net is the fee
        let first = &result.trades[0];
        assert!((first.pnl + 0.001 * 200.0).abs() < 1e-9);
    }

    #[test]
    fn strict_threshold_produces_no_trades() {
        let candles = make_candles(&[100.0; 60]);
        let mut config = StrategyConfig::default();
        config.filters.required_score = 10.0;
        let frame = IndicatorFrame::compute(&candles, &config.indicators);
        let result = TradeSimulator::new(config).run(&candles, &frame);
        assert!(result.trades.is_empty());
    }

    #[test]
    fn no_entry_during_warmup() {
        let candles = make_candles(&[100.0; 60]);
        let config = permissive_config();
        let frame = IndicatorFrame::compute(&candles, &config.indicators);
        let result = TradeSimulator::new(config).run(&candles, &frame);
        for trade in &result.trades {
            assert!(trade.entry_time >= candles[frame.warmup_bars()].timestamp);
        }
    }

    #[test]
    fn open_position_is_force_closed_at_series_end() {
        let candles = make_candles(&[100.0; 40]);
        let mut config = permissive_config();
        config.simulator.max_hold_bars = 500; // never times out naturally
        let frame = IndicatorFrame::compute(&candles, &config.indicators);
        let result = TradeSimulator::new(config).run(&candles, &frame);

        assert_eq!(result.trades.len(), 1);
        let only = &result.trades[0];
        assert_eq!(only.exit_reason, ExitReason::Timeout);
        assert_eq!(only.exit_time, candles.last().unwrap().timestamp);
    }

    #[test]
    fn anomalous_bars_are_counted_not_fatal() {
        let mut candles = make_candles(&[100.0; 60]);
        let config = permissive_config();
        let frame = IndicatorFrame::compute(&candles, &config.indicators);
        let warmup = frame.warmup_bars();
        // Corrupt a flat-period bar after warmup; recompute the frame so
        // the corruption is part of the run input
        candles[warmup].close = f64::NAN;
        candles[warmup].open = f64::NAN;
        candles[warmup].high = f64::NAN;
        candles[warmup].low = f64::NAN;
        let frame = IndicatorFrame::compute(&candles, &config.indicators);
        let result = TradeSimulator::new(config).run(&candles, &frame);
        assert!(result.anomaly_count >= 1);
    }
}
