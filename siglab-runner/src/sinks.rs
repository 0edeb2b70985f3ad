//! Notification and persistence seams.
//!
//! The engine produces a `BacktestRun`; where it goes (a chat message, an
//! HTTP endpoint, a file) is an external concern. These traits define the
//! contract; the in-tree implementations only render bytes into writers or
//! the log.

use std::io::Write;

use thiserror::Error;

use siglab_core::domain::Trade;

use crate::export::{export_trades_csv, render_summary};
use crate::metrics::PerformanceReport;
use crate::runner::BacktestRun;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("sink failure: {0}")]
    Other(String),
}

/// Delivers a finished run somewhere a human will see it.
pub trait ReportSink {
    fn notify(&mut self, run: &BacktestRun) -> Result<(), SinkError>;
}

/// Stores the trade log and report somewhere durable.
pub trait PersistSink {
    fn persist(&mut self, trades: &[Trade], report: &PerformanceReport) -> Result<(), SinkError>;
}

/// Emits the run summary through the `log` facade.
#[derive(Debug, Default)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn notify(&mut self, run: &BacktestRun) -> Result<(), SinkError> {
        for line in render_summary(run).lines() {
            log::info!("{line}");
        }
        Ok(())
    }
}

/// Writes the run summary into any writer.
pub struct TextSink<W: Write> {
    writer: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for TextSink<W> {
    fn notify(&mut self, run: &BacktestRun) -> Result<(), SinkError> {
        self.writer.write_all(render_summary(run).as_bytes())?;
        Ok(())
    }
}

/// Writes the trade log as CSV into any writer.
pub struct CsvSink<W: Write> {
    writer: W,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PersistSink for CsvSink<W> {
    fn persist(&mut self, trades: &[Trade], _report: &PerformanceReport) -> Result<(), SinkError> {
        let csv = export_trades_csv(trades).map_err(|e| SinkError::Other(e.to_string()))?;
        self.writer.write_all(csv.as_bytes())?;
        Ok(())
    }
}
