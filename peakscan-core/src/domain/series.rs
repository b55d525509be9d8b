//! Price series — canonical per-symbol bar sequence.

use serde::{Deserialize, Serialize};

use super::bar::Bar;

/// A canonical price series for one symbol.
///
/// Invariant: dates strictly increase, no void bars. An empty series or a
/// series with a single bar is a valid state — it means "no signal", not an
/// error, and every engine must handle it by skipping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Canonicalize raw provider bars: drop void bars, sort ascending by
    /// date, keep the first bar of any duplicate date.
    pub fn canonicalize(mut bars: Vec<Bar>) -> Self {
        bars.retain(|b| !b.is_void());
        // Stable sort: the first-seen bar of a duplicate date survives dedup.
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Self { bars }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000,
            adj_close: close,
        }
    }

    #[test]
    fn canonicalize_sorts_by_date() {
        let series = PriceSeries::canonicalize(vec![bar(3, 103.0), bar(1, 101.0), bar(2, 102.0)]);
        let dates: Vec<u32> = series
            .bars()
            .iter()
            .map(|b| chrono::Datelike::day(&b.date))
            .collect();
        assert_eq!(dates, vec![1, 2, 3]);
    }

    #[test]
    fn canonicalize_keeps_first_duplicate() {
        let series = PriceSeries::canonicalize(vec![bar(1, 101.0), bar(1, 999.0), bar(2, 102.0)]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.first().unwrap().close, 101.0);
    }

    #[test]
    fn canonicalize_drops_void_bars() {
        let mut void = bar(2, 102.0);
        void.adj_close = f64::NAN;
        let series = PriceSeries::canonicalize(vec![bar(1, 101.0), void, bar(3, 103.0)]);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn empty_and_single_bar_are_valid() {
        let empty = PriceSeries::canonicalize(vec![]);
        assert!(empty.is_empty());
        assert!(empty.first().is_none());

        let single = PriceSeries::canonicalize(vec![bar(1, 101.0)]);
        assert_eq!(single.len(), 1);
    }
}
