//! Scan orchestration — universe resolution, per-ticker fan-out, result folding.
//!
//! Tickers are fanned out across a rayon parallel map (each ticker's
//! fetch+detect work is independent and side-effect-free) and the per-ticker
//! outcomes are merged afterwards in ticker order, so results are
//! deterministic regardless of scheduling. Per-ticker failures become
//! inspectable skip records; only universe resolution aborts an invocation.

use chrono::{Duration, NaiveDate};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use peakscan_core::data::{normalize_symbol, PriceProvider, Universe};
use peakscan_core::domain::PriceSeries;
use peakscan_core::scan::{
    detect, evaluate_ticker, summarize, DataUnavailable, Occurrence, PatternSummary, ReturnRow,
    ScanProgress,
};

use crate::config::{ConfigError, ScanConfig};

/// Errors that abort a whole scan invocation.
///
/// Deliberately narrow: per-ticker data problems are folded into the result
/// set as skips and never appear here.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("universe error: {0}")]
    Universe(String),
}

/// A ticker the scan passed over, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerSkip {
    pub symbol: String,
    pub reason: DataUnavailable,
}

/// Output of a return scan: qualifying rows plus the skip ledger.
#[derive(Debug, Clone)]
pub struct ReturnScanResult {
    pub rows: Vec<ReturnRow>,
    pub skipped: Vec<TickerSkip>,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
}

/// Output of a pattern scan: occurrence rows, their summary, and the skip ledger.
#[derive(Debug, Clone)]
pub struct PatternScanResult {
    pub occurrences: Vec<Occurrence>,
    pub summary: PatternSummary,
    pub skipped: Vec<TickerSkip>,
}

/// Resolve the ticker list for a config: explicit tickers win, then the
/// universe file, then the built-in default universe. A universe load
/// failure aborts the invocation — unlike per-ticker fetch failures.
pub fn resolve_tickers(config: &ScanConfig) -> Result<Vec<String>, ScanError> {
    if !config.tickers.is_empty() {
        return Ok(config
            .tickers
            .iter()
            .map(|t| normalize_symbol(t))
            .filter(|t| !t.is_empty())
            .collect());
    }

    let universe = match &config.universe_file {
        Some(path) => Universe::from_file(path).map_err(ScanError::Universe)?,
        None => Universe::default_indices(),
    };
    Ok(universe.all_tickers())
}

/// Fetch and canonicalize one ticker's series, mapping every provider-side
/// problem into a skip reason.
fn fetch_series(
    provider: &dyn PriceProvider,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PriceSeries, DataUnavailable> {
    if !provider.is_available() {
        // Circuit breaker tripped mid-batch: the remaining tickers are
        // skipped quickly instead of each timing out.
        return Err(DataUnavailable::Provider(
            "provider unavailable (circuit breaker)".into(),
        ));
    }
    let result = provider
        .fetch(symbol, start, end)
        .map_err(|e| DataUnavailable::Provider(e.to_string()))?;
    let series = PriceSeries::canonicalize(result.bars);
    if series.is_empty() {
        return Err(DataUnavailable::NoData);
    }
    Ok(series)
}

/// Run the windowed-return scan over a ticker list.
///
/// The lookback window is `[today - years*365d, today]`. Never fails: the
/// worst case is a result set where every ticker is in `skipped`.
pub fn run_return_scan(
    provider: &dyn PriceProvider,
    tickers: &[String],
    min_return: f64,
    years: u32,
    today: NaiveDate,
    progress: &dyn ScanProgress,
) -> ReturnScanResult {
    let window_start = today - Duration::days(i64::from(years) * 365);
    let total = tickers.len();

    let outcomes: Vec<(String, Result<Option<ReturnRow>, DataUnavailable>)> = tickers
        .par_iter()
        .enumerate()
        .map(|(index, symbol)| {
            progress.on_start(symbol, index, total);
            let outcome = fetch_series(provider, symbol, window_start, today)
                .and_then(|series| evaluate_ticker(symbol, &series, min_return));
            match &outcome {
                Ok(row) => progress.on_complete(symbol, index, total, Ok(usize::from(row.is_some()))),
                Err(reason) => progress.on_complete(symbol, index, total, Err(reason)),
            }
            (symbol.clone(), outcome)
        })
        .collect();

    let mut rows = Vec::new();
    let mut skipped = Vec::new();
    for (symbol, outcome) in outcomes {
        match outcome {
            Ok(Some(row)) => rows.push(row),
            Ok(None) => {}
            Err(reason) => skipped.push(TickerSkip { symbol, reason }),
        }
    }
    progress.on_batch_complete(total - skipped.len(), skipped.len(), total);

    ReturnScanResult {
        rows,
        skipped,
        window_start,
        window_end: today,
    }
}

/// Run the lifetime-high pattern scan over a ticker list.
///
/// `appreciation_threshold` and `success_threshold` are percentages; the
/// detector's fractional threshold is derived here, mirroring where the
/// caller-facing unit ends.
pub fn run_pattern_scan(
    provider: &dyn PriceProvider,
    tickers: &[String],
    appreciation_threshold: f64,
    success_threshold: f64,
    history_years: u32,
    today: NaiveDate,
    progress: &dyn ScanProgress,
) -> PatternScanResult {
    let window_start = today - Duration::days(i64::from(history_years) * 365);
    let threshold = appreciation_threshold / 100.0;
    let total = tickers.len();

    let outcomes: Vec<(String, Result<Vec<Occurrence>, DataUnavailable>)> = tickers
        .par_iter()
        .enumerate()
        .map(|(index, symbol)| {
            progress.on_start(symbol, index, total);
            let outcome = fetch_series(provider, symbol, window_start, today)
                .map(|series| detect(symbol, &series, threshold));
            match &outcome {
                Ok(occurrences) => progress.on_complete(symbol, index, total, Ok(occurrences.len())),
                Err(reason) => progress.on_complete(symbol, index, total, Err(reason)),
            }
            (symbol.clone(), outcome)
        })
        .collect();

    let mut occurrences = Vec::new();
    let mut skipped = Vec::new();
    for (symbol, outcome) in outcomes {
        match outcome {
            Ok(ticker_occurrences) => occurrences.extend(ticker_occurrences),
            Err(reason) => skipped.push(TickerSkip { symbol, reason }),
        }
    }
    progress.on_batch_complete(total - skipped.len(), skipped.len(), total);

    let summary = summarize(&occurrences, success_threshold);

    PatternScanResult {
        occurrences,
        summary,
        skipped,
    }
}

/// High-level entry point: resolve the universe from config, then run the
/// return scan. Used by the CLI.
pub fn scan_returns(
    config: &ScanConfig,
    provider: &dyn PriceProvider,
    today: NaiveDate,
    progress: &dyn ScanProgress,
) -> Result<ReturnScanResult, ScanError> {
    let tickers = resolve_tickers(config)?;
    Ok(run_return_scan(
        provider,
        &tickers,
        config.min_return,
        config.years,
        today,
        progress,
    ))
}

/// High-level entry point: resolve the universe from config, then run the
/// pattern scan. Used by the CLI.
pub fn scan_pattern(
    config: &ScanConfig,
    provider: &dyn PriceProvider,
    today: NaiveDate,
    progress: &dyn ScanProgress,
) -> Result<PatternScanResult, ScanError> {
    let tickers = resolve_tickers(config)?;
    Ok(run_pattern_scan(
        provider,
        &tickers,
        config.appreciation_threshold,
        config.success_threshold,
        config.history_years,
        today,
        progress,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use peakscan_core::data::{DataError, DataSource, FetchResult};
    use peakscan_core::domain::Bar;
    use peakscan_core::scan::SilentProgress;
    use std::collections::HashMap;

    /// Provider serving canned bar sets; unknown symbols get an empty set.
    struct MockProvider {
        series: HashMap<String, Vec<Bar>>,
        available: bool,
    }

    impl MockProvider {
        fn new() -> Self {
            Self {
                series: HashMap::new(),
                available: true,
            }
        }

        fn with_closes(mut self, symbol: &str, closes: &[f64]) -> Self {
            let base = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
            let bars = closes
                .iter()
                .enumerate()
                .map(|(i, &close)| Bar {
                    date: base + Duration::days(i as i64),
                    open: close,
                    high: close + 0.5,
                    low: close - 0.5,
                    close,
                    volume: 1_000,
                    adj_close: close,
                })
                .collect();
            self.series.insert(symbol.to_string(), bars);
            self
        }
    }

    impl PriceProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn fetch(
            &self,
            symbol: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<FetchResult, DataError> {
            Ok(FetchResult {
                symbol: symbol.to_string(),
                bars: self.series.get(symbol).cloned().unwrap_or_default(),
                source: DataSource::Synthetic,
            })
        }

        fn is_available(&self) -> bool {
            self.available
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    #[test]
    fn empty_series_skips_the_ticker_not_the_scan() {
        let provider = MockProvider::new().with_closes("AAPL", &[100.0, 99.0, 95.0]);
        let tickers = vec!["AAPL".to_string(), "BADTICKER".to_string()];

        let result = run_return_scan(&provider, &tickers, 0.0, 7, today(), &SilentProgress);

        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].symbol, "AAPL");
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].symbol, "BADTICKER");
        assert_eq!(result.skipped[0].reason, DataUnavailable::NoData);
    }

    #[test]
    fn rows_come_back_in_ticker_order() {
        let provider = MockProvider::new()
            .with_closes("AAA", &[100.0, 90.0])
            .with_closes("BBB", &[100.0, 80.0])
            .with_closes("CCC", &[100.0, 70.0]);
        let tickers: Vec<String> = ["CCC", "AAA", "BBB"].iter().map(|s| s.to_string()).collect();

        let result = run_return_scan(&provider, &tickers, 0.0, 7, today(), &SilentProgress);
        let symbols: Vec<&str> = result.rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["CCC", "AAA", "BBB"]);
    }

    #[test]
    fn unavailable_provider_skips_everything() {
        let mut provider = MockProvider::new().with_closes("AAPL", &[100.0, 99.0]);
        provider.available = false;
        let tickers = vec!["AAPL".to_string()];

        let result = run_return_scan(&provider, &tickers, 0.0, 7, today(), &SilentProgress);
        assert!(result.rows.is_empty());
        assert_eq!(result.skipped.len(), 1);
    }

    #[test]
    fn pattern_scan_aggregates_across_tickers() {
        // One clean setup per ticker: high at bar 0, support holds, +15%.
        let mut closes = vec![100.0];
        closes.extend(vec![98.5; 10]);
        closes.extend(vec![115.0; 20]);

        let provider = MockProvider::new()
            .with_closes("ONE", &closes)
            .with_closes("TWO", &closes);
        let tickers = vec!["ONE".to_string(), "TWO".to_string(), "NONE".to_string()];

        let result =
            run_pattern_scan(&provider, &tickers, 10.0, 10.0, 10, today(), &SilentProgress);

        assert_eq!(result.summary.total_instances, result.occurrences.len());
        assert!(result.occurrences.iter().any(|o| o.symbol == "ONE"));
        assert!(result.occurrences.iter().any(|o| o.symbol == "TWO"));
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.summary.successful_instances, result.summary.total_instances);
        assert_eq!(result.summary.success_rate, 100.0);
    }

    #[test]
    fn explicit_tickers_override_the_universe() {
        let config = ScanConfig {
            tickers: vec![" aapl".into(), "tcs.ns ".into(), "  ".into()],
            ..ScanConfig::default()
        };
        let tickers = resolve_tickers(&config).unwrap();
        assert_eq!(tickers, vec!["AAPL".to_string(), "TCS.NS".to_string()]);
    }

    #[test]
    fn missing_universe_file_aborts_the_invocation() {
        let config = ScanConfig {
            universe_file: Some("/definitely/not/here.toml".into()),
            ..ScanConfig::default()
        };
        let err = resolve_tickers(&config).unwrap_err();
        assert!(matches!(err, ScanError::Universe(_)));
    }

    #[test]
    fn empty_ticker_list_defaults_to_the_builtin_universe() {
        let config = ScanConfig::default();
        let tickers = resolve_tickers(&config).unwrap();
        assert!(tickers.contains(&"AAPL".to_string()));
        assert!(tickers.len() > 30);
    }
}
