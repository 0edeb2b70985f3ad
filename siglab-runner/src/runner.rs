//! Backtest orchestration: validate, compute, simulate, aggregate.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use siglab_core::data::provider::parse_timeframe;
use siglab_core::domain::{validate_series, Candle, Trade};
use siglab_core::engine::TradeSimulator;
use siglab_core::error::{ConfigError, DataError};
use siglab_core::frame::IndicatorFrame;

use crate::config::{RunConfig, RunId};
use crate::metrics::PerformanceReport;

/// Version stamp written into persisted results. Unknown versions are
/// rejected on load.
pub const SCHEMA_VERSION: u32 = 1;

/// A run that could not even start. Per-bar problems never surface here;
/// they degrade the run and are annotated on the report instead.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid candle data: {0}")]
    Data(#[from] DataError),

    #[error("symbol must not be empty")]
    EmptySymbol,

    #[error("unknown timeframe: {0}")]
    Timeframe(String),

    #[error("insufficient data: need at least {required} candles, got {got}")]
    InsufficientData { required: usize, got: usize },
}

/// Complete result of one backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestRun {
    pub schema_version: u32,
    pub run_id: RunId,
    pub config: RunConfig,
    pub bars: usize,
    pub warmup_bars: usize,
    pub trades: Vec<Trade>,
    pub report: PerformanceReport,
}

/// Validate a run configuration beyond the strategy surface itself.
fn validate_config(config: &RunConfig) -> Result<(), RunError> {
    if config.symbol.trim().is_empty() {
        return Err(RunError::EmptySymbol);
    }
    if parse_timeframe(&config.timeframe).is_none() {
        return Err(RunError::Timeframe(config.timeframe.clone()));
    }
    config.strategy.validate()?;
    Ok(())
}

/// Run one backtest over a caller-supplied candle series.
///
/// Fails fast on configuration or data-shape problems; otherwise always
/// returns a report, annotated with the anomaly count when bars had to be
/// skipped.
pub fn run(candles: &[Candle], config: &RunConfig) -> Result<BacktestRun, RunError> {
    validate_config(config)?;
    validate_series(candles)?;

    let frame = IndicatorFrame::compute(candles, &config.strategy.indicators);
    // One decidable bar after warmup, plus one bar to exit on
    let required = frame.warmup_bars() + 2;
    if candles.len() < required {
        return Err(RunError::InsufficientData {
            required,
            got: candles.len(),
        });
    }

    let result = TradeSimulator::new(config.strategy.clone()).run(candles, &frame);
    let report =
        PerformanceReport::from_trades(&result.trades, config.strategy.simulator.initial_balance)
            .with_anomalies(result.anomaly_count);

    info!(
        "{} {}: {} bars, {} trades, final balance {:.2}",
        config.symbol,
        config.timeframe,
        result.bars_processed,
        result.trades.len(),
        report.final_balance
    );

    Ok(BacktestRun {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        config: config.clone(),
        bars: result.bars_processed,
        warmup_bars: result.warmup_bars,
        trades: result.trades,
        report,
    })
}

/// Run many independent backtests in parallel.
///
/// Each (candles, config) unit owns its state, so units scale out across
/// threads with no coordination; results come back in input order.
pub fn run_many(units: &[(Vec<Candle>, RunConfig)]) -> Vec<Result<BacktestRun, RunError>> {
    units
        .par_iter()
        .map(|(candles, config)| run(candles, config))
        .collect()
}
