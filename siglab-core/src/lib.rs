//! SigLab Core: indicator frame, entry filters, risk plans, and the
//! bar-by-bar trade simulator.
//!
//! Data flows strictly forward through the pipeline:
//! candles -> IndicatorFrame -> FilterEvaluator -> DecisionMaker (with
//! RiskSizer) -> TradeSimulator. The runner crate folds the resulting
//! trade log into a performance report.
//!
//! The core is single-threaded and fully synchronous. Each
//! (symbol, timeframe, config) run is an independent unit of work with no
//! shared mutable state, so many runs can execute concurrently; the
//! Send + Sync check below keeps that property from regressing.

pub mod config;
pub mod data;
pub mod decision;
pub mod domain;
pub mod engine;
pub mod error;
pub mod filters;
pub mod frame;
pub mod indicators;
pub mod risk;
