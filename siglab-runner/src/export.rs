//! Result export: JSON, CSV, and a plain-text summary.
//!
//! Every function renders bytes or strings; where they end up (file,
//! socket, message) is the caller's concern. Persisted JSON carries a
//! `schema_version` field and unknown versions are rejected on load.

use anyhow::{bail, Context, Result};

use siglab_core::domain::{Side, Trade};

use crate::runner::{BacktestRun, SCHEMA_VERSION};

/// Serialize a `BacktestRun` to pretty JSON.
pub fn export_json(run: &BacktestRun) -> Result<String> {
    serde_json::to_string_pretty(run).context("failed to serialize BacktestRun to JSON")
}

/// Deserialize a `BacktestRun` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<BacktestRun> {
    let run: BacktestRun =
        serde_json::from_str(json).context("failed to deserialize BacktestRun from JSON")?;
    if run.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            run.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(run)
}

/// Export the trade log as CSV.
///
/// Columns: side, entry_time, exit_time, entry_price, exit_price,
/// exit_reason, pnl, return_pct, bars_held.
pub fn export_trades_csv(trades: &[Trade]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "side",
        "entry_time",
        "exit_time",
        "entry_price",
        "exit_price",
        "exit_reason",
        "pnl",
        "return_pct",
        "bars_held",
    ])?;

    for t in trades {
        let side = match t.side {
            Side::Long => "long",
            Side::Short => "short",
        };
        wtr.write_record([
            side,
            &t.entry_time.to_rfc3339(),
            &t.exit_time.to_rfc3339(),
            &format!("{:.6}", t.entry_price),
            &format!("{:.6}", t.exit_price),
            &format!("{:?}", t.exit_reason),
            &format!("{:.6}", t.pnl),
            &format!("{:.4}", t.return_pct),
            &t.bars_held.to_string(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export the trade-replay equity curve as CSV.
pub fn export_equity_csv(run: &BacktestRun) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["time", "balance"])?;
    for point in &run.report.equity_curve {
        wtr.write_record([&point.time.to_rfc3339(), &format!("{:.2}", point.balance)])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Render a human-readable summary block for one run.
pub fn render_summary(run: &BacktestRun) -> String {
    let r = &run.report;
    let mut out = String::with_capacity(512);

    out.push_str("Backtest summary\n");
    out.push_str("================\n");
    out.push_str(&format!(
        "instrument:        {} ({})\n",
        run.config.symbol, run.config.timeframe
    ));
    out.push_str(&format!("run id:            {}\n", &run.run_id[..12]));
    out.push_str(&format!(
        "bars:              {} ({} warmup)\n",
        run.bars, run.warmup_bars
    ));
    out.push_str(&format!(
        "trades:            {} ({} wins / {} losses)\n",
        r.total_trades, r.winning_trades, r.losing_trades
    ));
    out.push_str(&format!("win rate:          {:.1}%\n", r.win_rate));
    out.push_str(&format!("profit factor:     {:.2}\n", r.profit_factor));
    out.push_str(&format!("total return:      {:.2}%\n", r.total_return_pct));
    out.push_str(&format!(
        "annualized return: {:.2}%\n",
        r.annualized_return_pct
    ));
    out.push_str(&format!(
        "max drawdown:      {:.2}%\n",
        r.max_drawdown * 100.0
    ));
    out.push_str(&format!(
        "exits:             {} stop / {} target / {} timeout\n",
        r.exits.stop_loss, r.exits.take_profit, r.exits.timeout
    ));
    out.push_str(&format!("final balance:     {:.2}\n", r.final_balance));
    if r.anomaly_count > 0 {
        out.push_str(&format!(
            "anomalies:         {} bars skipped\n",
            r.anomaly_count
        ));
    }

    out
}
