//! Performance aggregation: pure folds over the completed trade log.
//!
//! Every statistic is defined for the empty log: win rate is 0 (not NaN),
//! profit factor is 0, drawdown is 0, and the balance is unchanged. The
//! profit factor uses `f64::INFINITY` as the explicit no-losses sentinel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use siglab_core::domain::{ExitReason, Trade};

/// One point of the trade-replay equity curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub time: DateTime<Utc>,
    pub balance: f64,
}

/// Trade counts by exit reason.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExitCounts {
    pub stop_loss: usize,
    pub take_profit: usize,
    pub timeout: usize,
}

/// Aggregate statistics for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Percent, 0..=100. Exactly 0 when there are no trades.
    pub win_rate: f64,
    /// Gross profit / gross loss. `f64::INFINITY` when there are profits
    /// and no losses; 0 when there are no trades. JSON cannot carry
    /// infinity, so the sentinel is stored as null and restored on load.
    #[serde(
        serialize_with = "serialize_profit_factor",
        deserialize_with = "deserialize_profit_factor"
    )]
    pub profit_factor: f64,
    /// Deepest trough relative to the running peak, as a fraction <= 0.
    pub max_drawdown: f64,
    pub total_return_pct: f64,
    pub annualized_return_pct: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub avg_hold_bars: f64,
    pub exits: ExitCounts,
    pub initial_balance: f64,
    pub final_balance: f64,
    /// Balance after each trade, in exit order, seeded with the starting
    /// balance at the first entry.
    pub equity_curve: Vec<EquityPoint>,
    /// Bars the simulator skipped as unevaluable. A non-zero count marks a
    /// degraded-but-completed run.
    pub anomaly_count: usize,
}

impl PerformanceReport {
    /// Fold a trade log into summary statistics.
    ///
    /// Trades are replayed in exit-time order against `initial_balance`;
    /// the equity curve and drawdown come from that replay.
    pub fn from_trades(trades: &[Trade], initial_balance: f64) -> Self {
        let mut ordered: Vec<&Trade> = trades.iter().collect();
        ordered.sort_by_key(|t| t.exit_time);

        let total_trades = ordered.len();
        let winning: Vec<&&Trade> = ordered.iter().filter(|t| t.pnl > 0.0).collect();
        let losing: Vec<&&Trade> = ordered.iter().filter(|t| t.pnl < 0.0).collect();

        let win_rate = if total_trades > 0 {
            winning.len() as f64 / total_trades as f64 * 100.0
        } else {
            0.0
        };

        let gross_profit: f64 = winning.iter().map(|t| t.pnl).sum();
        let gross_loss: f64 = losing.iter().map(|t| t.pnl.abs()).sum();
        let profit_factor = if total_trades == 0 {
            0.0
        } else if gross_loss > 0.0 {
            gross_profit / gross_loss
        } else if gross_profit > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        let mut equity_curve = Vec::with_capacity(total_trades + 1);
        let mut balance = initial_balance;
        if let Some(first) = ordered.first() {
            equity_curve.push(EquityPoint {
                time: first.entry_time,
                balance,
            });
        }
        let mut exits = ExitCounts::default();
        for trade in &ordered {
            balance += trade.pnl;
            equity_curve.push(EquityPoint {
                time: trade.exit_time,
                balance,
            });
            match trade.exit_reason {
                ExitReason::StopLoss => exits.stop_loss += 1,
                ExitReason::TakeProfit => exits.take_profit += 1,
                ExitReason::Timeout => exits.timeout += 1,
            }
        }
        let final_balance = balance;

        let max_drawdown = max_drawdown(&equity_curve);
        let total_return_pct = if initial_balance > 0.0 {
            (final_balance - initial_balance) / initial_balance * 100.0
        } else {
            0.0
        };
        let annualized_return_pct = annualized_return_pct(&ordered, initial_balance, final_balance);

        let avg = |subset: &[&&Trade]| {
            if subset.is_empty() {
                0.0
            } else {
                subset.iter().map(|t| t.pnl).sum::<f64>() / subset.len() as f64
            }
        };
        let avg_hold_bars = if total_trades > 0 {
            ordered.iter().map(|t| t.bars_held as f64).sum::<f64>() / total_trades as f64
        } else {
            0.0
        };

        Self {
            total_trades,
            winning_trades: winning.len(),
            losing_trades: losing.len(),
            win_rate,
            profit_factor,
            max_drawdown,
            total_return_pct,
            annualized_return_pct,
            avg_win: avg(&winning),
            avg_loss: avg(&losing),
            avg_hold_bars,
            exits,
            initial_balance,
            final_balance,
            equity_curve,
            anomaly_count: 0,
        }
    }

    /// Annotate the report with the simulator's anomaly count.
    pub fn with_anomalies(mut self, anomaly_count: usize) -> Self {
        self.anomaly_count = anomaly_count;
        self
    }
}

fn serialize_profit_factor<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if value.is_finite() {
        serializer.serialize_some(value)
    } else {
        serializer.serialize_none()
    }
}

fn deserialize_profit_factor<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.unwrap_or(f64::INFINITY))
}

/// Deepest trough relative to the running peak, as a fraction <= 0.
fn max_drawdown(curve: &[EquityPoint]) -> f64 {
    if curve.is_empty() {
        return 0.0;
    }
    let mut peak = curve[0].balance;
    let mut max_dd = 0.0_f64;
    for point in curve {
        if point.balance > peak {
            peak = point.balance;
        }
        if peak > 0.0 {
            let dd = (point.balance - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Annualized return in percent, from the span between the first entry and
/// the last exit. Zero for empty logs or degenerate spans.
fn annualized_return_pct(ordered: &[&Trade], initial: f64, fin: f64) -> f64 {
    let (first, last) = match (ordered.first(), ordered.last()) {
        (Some(f), Some(l)) => (f.entry_time, l.exit_time),
        _ => return 0.0,
    };
    let seconds = (last - first).num_seconds() as f64;
    let years = seconds / (365.25 * 24.0 * 3600.0);
    if years <= 0.0 || initial <= 0.0 || fin <= 0.0 {
        return 0.0;
    }
    ((fin / initial).powf(1.0 / years) - 1.0) * 100.0
}
