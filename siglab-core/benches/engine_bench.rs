//! Criterion benchmarks for the hot paths.
//!
//! Benchmarks:
//! 1. Indicator frame precompute (all nine series, batch)
//! 2. Filter evaluation at a single bar
//! 3. Full bar-by-bar simulation

use chrono::TimeZone;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use siglab_core::config::StrategyConfig;
use siglab_core::data::SyntheticProvider;
use siglab_core::domain::Candle;
use siglab_core::engine::TradeSimulator;
use siglab_core::filters::FilterEvaluator;
use siglab_core::frame::IndicatorFrame;

fn make_candles(n: usize) -> Vec<Candle> {
    let start = chrono::Utc.with_ymd_and_hms(2022, 1, 3, 0, 0, 0).unwrap();
    SyntheticProvider::new(99)
        .with_volatility(0.012)
        .generate(n, start, chrono::Duration::minutes(15))
}

fn bench_frame_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_compute");
    let config = StrategyConfig::default();
    for n in [1_000usize, 5_000] {
        let candles = make_candles(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &candles, |b, candles| {
            b.iter(|| IndicatorFrame::compute(black_box(candles), &config.indicators));
        });
    }
    group.finish();
}

fn bench_filter_evaluate(c: &mut Criterion) {
    let config = StrategyConfig::default();
    let candles = make_candles(1_000);
    let frame = IndicatorFrame::compute(&candles, &config.indicators);
    let evaluator = FilterEvaluator::new(config.filters.clone());

    c.bench_function("filter_evaluate_bar", |b| {
        b.iter(|| evaluator.evaluate(black_box(&candles), black_box(&frame), 900));
    });
}

fn bench_full_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    let mut config = StrategyConfig::default();
    config.filters.required_score = 5.0;
    for n in [1_000usize, 5_000] {
        let candles = make_candles(n);
        let frame = IndicatorFrame::compute(&candles, &config.indicators);
        let simulator = TradeSimulator::new(config.clone());
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(candles, frame),
            |b, (candles, frame)| {
                b.iter(|| simulator.run(black_box(candles), black_box(frame)));
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_frame_compute,
    bench_filter_evaluate,
    bench_full_simulation
);
criterion_main!(benches);
