//! PeakScan Core — scan engines, domain types, and data providers.
//!
//! This crate contains the heart of the scanner:
//! - Domain types (daily bars, canonical price series)
//! - Return scan engine (windowed total-return filter, at-or-below sense)
//! - Lifetime-high pattern detection (high → support hold → appreciation)
//! - Result aggregation (success counters, per-year occurrence buckets)
//! - Data provider seam (Yahoo Finance client, synthetic fallback, circuit breaker)
//! - Universe configuration (index-organized ticker lists)

pub mod data;
pub mod domain;
pub mod scan;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything the scan loop fans out across worker
    /// threads must be Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();

        require_send::<scan::ReturnRow>();
        require_sync::<scan::ReturnRow>();
        require_send::<scan::Occurrence>();
        require_sync::<scan::Occurrence>();
        require_send::<scan::PatternSummary>();
        require_sync::<scan::PatternSummary>();
        require_send::<scan::DataUnavailable>();
        require_sync::<scan::DataUnavailable>();

        require_send::<data::CircuitBreaker>();
        require_sync::<data::CircuitBreaker>();
        require_send::<data::SyntheticProvider>();
        require_sync::<data::SyntheticProvider>();
        require_send::<data::YahooProvider>();
        require_sync::<data::YahooProvider>();
    }
}
