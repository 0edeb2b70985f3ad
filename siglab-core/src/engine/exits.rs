//! Exit checks: stop, target, and timeout against a single bar.
//!
//! Stops and targets execute intrabar against the bar's low/high, not its
//! close. When one bar's range spans both levels the true OHLC path is
//! unknowable; the configured `SameBarPolicy` picks the resolution and is
//! applied uniformly across the run. Timeout is checked last and fills at
//! the bar's close.

use crate::config::{SameBarPolicy, SimulatorConfig};
use crate::domain::{Candle, ExitReason, Position, Side};

/// A triggered exit: fill price and reason.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitCheck {
    pub price: f64,
    pub reason: ExitReason,
}

/// Evaluate a position against one bar.
///
/// Order: stop, target (swapped under `TargetFirst`), then timeout at the
/// close when `bars_held` has reached the maximum and no price level
/// triggered.
pub fn check_exit(
    position: &Position,
    candle: &Candle,
    bars_held: usize,
    config: &SimulatorConfig,
) -> Option<ExitCheck> {
    let stop_hit = match position.side {
        Side::Long => candle.low <= position.stop_loss,
        Side::Short => candle.high >= position.stop_loss,
    };
    let target_hit = match position.side {
        Side::Long => candle.high >= position.take_profit,
        Side::Short => candle.low <= position.take_profit,
    };

    let stop = ExitCheck {
        price: position.stop_loss,
        reason: ExitReason::StopLoss,
    };
    let target = ExitCheck {
        price: position.take_profit,
        reason: ExitReason::TakeProfit,
    };

    let triggered = match (stop_hit, target_hit) {
        (true, true) => Some(match config.same_bar_policy {
            SameBarPolicy::StopFirst => stop,
            SameBarPolicy::TargetFirst => target,
        }),
        (true, false) => Some(stop),
        (false, true) => Some(target),
        (false, false) => None,
    };

    if triggered.is_some() {
        return triggered;
    }

    if bars_held >= config.max_hold_bars {
        return Some(ExitCheck {
            price: candle.close,
            reason: ExitReason::Timeout,
        });
    }

    None
}
