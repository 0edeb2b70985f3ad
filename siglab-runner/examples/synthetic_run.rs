//! Run one backtest over a deterministic synthetic series and print the
//! summary plus the trade tape.
//!
//! ```sh
//! RUST_LOG=info cargo run --example synthetic_run
//! ```

use anyhow::Result;
use chrono::TimeZone;

use siglab_core::data::SyntheticProvider;
use siglab_runner::export::{export_trades_csv, render_summary};
use siglab_runner::RunConfig;

fn main() -> Result<()> {
    env_logger::init();

    let start = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    let candles = SyntheticProvider::new(7)
        .with_drift(0.0004)
        .with_volatility(0.012)
        .generate(2_000, start, chrono::Duration::minutes(15));

    let mut config = RunConfig::new("BTC/USDT", "15m");
    config.strategy.filters.required_score = 5.0;
    config.strategy.simulator.max_hold_bars = 48;

    let run = siglab_runner::run(&candles, &config)?;

    print!("{}", render_summary(&run));
    println!();
    print!("{}", export_trades_csv(&run.trades)?);

    Ok(())
}
