//! Synthetic price provider — seeded random-walk bars.
//!
//! The offline fallback for demos, tests, and benches. Each symbol gets its
//! own deterministic walk derived from the provider seed, so repeated runs of
//! the same scan produce identical results.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{DataError, DataSource, FetchResult, PriceProvider};
use crate::domain::Bar;

/// Deterministic random-walk bar generator.
pub struct SyntheticProvider {
    /// Mean daily return (0.0004 ≈ 10%/year).
    pub drift: f64,
    /// Daily return half-range (0.015 ≈ 24%/year vol).
    pub volatility: f64,
    pub seed: u64,
}

impl SyntheticProvider {
    pub fn new(drift: f64, volatility: f64, seed: u64) -> Self {
        Self {
            drift,
            volatility,
            seed,
        }
    }

    /// Mildly upward-drifting walk, the default for `--synthetic` runs.
    pub fn default_walk() -> Self {
        Self::new(0.0004, 0.015, 7)
    }

    fn symbol_seed(&self, symbol: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        symbol.hash(&mut hasher);
        self.seed ^ hasher.finish()
    }
}

impl PriceProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        if start > end {
            return Err(DataError::Other(format!(
                "invalid range: {start} after {end}"
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.symbol_seed(symbol));
        let mut close = 50.0 + rng.gen_range(0.0..150.0);
        let mut bars = Vec::new();
        let mut date = start;

        while date <= end {
            // Weekday bars only; markets are shut on weekends.
            if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                let open = close;
                let step = self.drift + rng.gen_range(-self.volatility..self.volatility);
                close = (close * (1.0 + step)).max(0.01);
                let spread = rng.gen_range(0.0..self.volatility / 2.0);
                let high = open.max(close) * (1.0 + spread);
                let low = open.min(close) * (1.0 - spread);

                bars.push(Bar {
                    date,
                    open,
                    high,
                    low,
                    close,
                    volume: rng.gen_range(100_000..5_000_000),
                    adj_close: close,
                });
            }
            date = date.succ_opt().ok_or_else(|| {
                DataError::Other("date range extends past the calendar".into())
            })?;
        }

        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::Synthetic,
        })
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
    }

    #[test]
    fn deterministic_per_symbol() {
        let provider = SyntheticProvider::default_walk();
        let (start, end) = range();
        let a = provider.fetch("AAPL", start, end).unwrap();
        let b = provider.fetch("AAPL", start, end).unwrap();
        assert_eq!(a.bars.len(), b.bars.len());
        assert_eq!(a.bars[0].close, b.bars[0].close);
        assert_eq!(a.bars.last().unwrap().close, b.bars.last().unwrap().close);
    }

    #[test]
    fn different_symbols_diverge() {
        let provider = SyntheticProvider::default_walk();
        let (start, end) = range();
        let a = provider.fetch("AAPL", start, end).unwrap();
        let b = provider.fetch("MSFT", start, end).unwrap();
        assert_ne!(a.bars[0].close, b.bars[0].close);
    }

    #[test]
    fn skips_weekends_and_stays_sane() {
        let provider = SyntheticProvider::default_walk();
        let (start, end) = range();
        let result = provider.fetch("SPY", start, end).unwrap();
        assert!(!result.bars.is_empty());
        for bar in &result.bars {
            assert!(!matches!(
                bar.date.weekday(),
                Weekday::Sat | Weekday::Sun
            ));
            assert!(bar.is_sane(), "insane bar on {}", bar.date);
        }
    }

    #[test]
    fn inverted_range_is_an_error() {
        let provider = SyntheticProvider::default_walk();
        let (start, end) = range();
        assert!(provider.fetch("SPY", end, start).is_err());
    }
}
