//! Result aggregation across tickers.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::lifetime_high::Occurrence;
use super::round2;

/// Summary of a pattern scan across the whole ticker set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSummary {
    pub total_instances: usize,
    /// Occurrences whose `appreciation_pct` is at or above the success threshold.
    pub successful_instances: usize,
    /// `successful / total * 100`, rounded to 2 decimals; 0 when there are no
    /// occurrences at all.
    pub success_rate: f64,
    /// Occurrence count per calendar year, ascending by year.
    pub by_year: BTreeMap<i32, usize>,
}

/// Aggregate occurrence rows into summary counters and year buckets.
///
/// `success_threshold` is a percentage, compared against the stored
/// `appreciation_pct` (also a percentage). Read-only over its input.
pub fn summarize(occurrences: &[Occurrence], success_threshold: f64) -> PatternSummary {
    let total_instances = occurrences.len();
    let successful_instances = occurrences
        .iter()
        .filter(|o| o.appreciation_pct >= success_threshold)
        .count();
    let success_rate = if total_instances == 0 {
        0.0
    } else {
        round2(successful_instances as f64 / total_instances as f64 * 100.0)
    };

    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for occ in occurrences {
        *by_year.entry(occ.date.year()).or_insert(0) += 1;
    }

    PatternSummary {
        total_instances,
        successful_instances,
        success_rate,
        by_year,
    }
}
