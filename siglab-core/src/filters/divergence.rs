//! RSI/price divergence via pivot comparison.
//!
//! A pivot low at p is strictly lower than its `span` neighbors on each
//! side. That definition means a pivot is only confirmed once `span` bars
//! have printed after it: at evaluation index i, candidates are limited to
//! p <= i - span, so no future bar is ever read. Divergence compares the
//! two most recent confirmed pivots inside the lookback window: bullish
//! when price sets a lower low while the oscillator sets a higher low,
//! bearish on the mirrored highs.
//!
//! This is a sliding-window local-extremum scan, deliberately not a
//! monotonicity check over the trailing window; the two detect materially
//! different events.

use crate::config::FilterConfig;
use crate::domain::Candle;
use crate::frame::IndicatorFrame;

/// Bullish divergence at `index`: price lower pivot low, RSI higher pivot low.
pub fn bullish(
    candles: &[Candle],
    frame: &IndicatorFrame,
    index: usize,
    config: &FilterConfig,
) -> bool {
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
    detect(
        &lows,
        frame.rsi_series(),
        index,
        config.pivot_span,
        config.divergence_lookback,
        PivotKind::Low,
    )
}

/// Bearish divergence at `index`: price higher pivot high, RSI lower pivot high.
pub fn bearish(
    candles: &[Candle],
    frame: &IndicatorFrame,
    index: usize,
    config: &FilterConfig,
) -> bool {
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    detect(
        &highs,
        frame.rsi_series(),
        index,
        config.pivot_span,
        config.divergence_lookback,
        PivotKind::High,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PivotKind {
    Low,
    High,
}

/// True when `values[p]` strictly dominates its `span` neighbors on each side.
fn is_pivot(values: &[f64], p: usize, span: usize, kind: PivotKind) -> bool {
    if p < span || p + span >= values.len() {
        return false;
    }
    (1..=span).all(|j| match kind {
        PivotKind::Low => values[p] < values[p - j] && values[p] < values[p + j],
        PivotKind::High => values[p] > values[p - j] && values[p] > values[p + j],
    })
}

fn detect(
    values: &[f64],
    oscillator: &[f64],
    index: usize,
    span: usize,
    lookback: usize,
    kind: PivotKind,
) -> bool {
    if index < 2 * span || index >= values.len() {
        return false;
    }

    // Newest pivot confirmed at or before `index`; stale pivots outside the
    // lookback window do not fire.
    let newest = (span..=index - span)
        .rev()
        .find(|&p| is_pivot(values, p, span, kind));
    let p1 = match newest {
        Some(p) if index - p <= lookback => p,
        _ => return false,
    };

    // The adjacent earlier pivot inside the lookback window.
    let p0 = (span..p1)
        .rev()
        .take_while(|&p| p1 - p <= lookback)
        .find(|&p| is_pivot(values, p, span, kind));
    let p0 = match p0 {
        Some(p) => p,
        None => return false,
    };

    let (osc1, osc0) = match (oscillator.get(p1), oscillator.get(p0)) {
        (Some(&a), Some(&b)) if a.is_finite() && b.is_finite() => (a, b),
        _ => return false,
    };

    match kind {
        PivotKind::Low => values[p1] < values[p0] && osc1 > osc0,
        PivotKind::High => values[p1] > values[p0] && osc1 < osc0,
    }
}
