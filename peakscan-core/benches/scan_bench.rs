//! Criterion benchmarks for the scan hot paths.
//!
//! 1. Lifetime-high detection over long series
//! 2. Windowed-return computation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use peakscan_core::domain::{Bar, PriceSeries};
use peakscan_core::scan::{detect, window_return};

fn make_series(n: usize) -> PriceSeries {
    let base_date = chrono::NaiveDate::from_ymd_opt(2010, 1, 4).unwrap();
    let bars = (0..n)
        .map(|i| {
            // Slow uptrend with a sine wobble: plenty of fresh highs to probe.
            let close = 100.0 + i as f64 * 0.02 + (i as f64 * 0.1).sin() * 5.0;
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open: close - 0.3,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 1_000_000,
                adj_close: close,
            }
        })
        .collect();
    PriceSeries::canonicalize(bars)
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("lifetime_high_detect");
    for n in [1_000usize, 5_000, 20_000] {
        let series = make_series(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &series, |b, series| {
            b.iter(|| detect(black_box("BENCH"), black_box(series), black_box(0.10)));
        });
    }
    group.finish();
}

fn bench_window_return(c: &mut Criterion) {
    let series = make_series(5_000);
    c.bench_function("window_return_5000", |b| {
        b.iter(|| window_return(black_box(&series)));
    });
}

criterion_group!(benches, bench_detect, bench_window_return);
criterion_main!(benches);
