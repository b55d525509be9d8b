//! Progress callbacks for multi-ticker scans.

use super::DataUnavailable;

/// Observer for a batch scan. Implementations must be thread-safe: the scan
/// loop may fan tickers out across worker threads.
pub trait ScanProgress: Send + Sync {
    /// Called when a ticker's fetch+detect work begins.
    fn on_start(&self, symbol: &str, index: usize, total: usize);

    /// Called when a ticker finishes. `Ok` carries the number of result rows
    /// the ticker contributed (zero is a valid, non-error outcome).
    fn on_complete(
        &self,
        symbol: &str,
        index: usize,
        total: usize,
        result: Result<usize, &DataUnavailable>,
    );

    /// Called once when the whole batch is done.
    fn on_batch_complete(&self, scanned: usize, skipped: usize, total: usize);
}

/// Progress reporter that prints to stdout.
pub struct StdoutProgress;

impl ScanProgress for StdoutProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        println!("[{}/{}] Scanning {symbol}...", index + 1, total);
    }

    fn on_complete(
        &self,
        symbol: &str,
        _index: usize,
        _total: usize,
        result: Result<usize, &DataUnavailable>,
    ) {
        match result {
            Ok(rows) => println!("  OK: {symbol} ({rows} rows)"),
            Err(reason) => println!("  SKIP: {symbol}: {reason}"),
        }
    }

    fn on_batch_complete(&self, scanned: usize, skipped: usize, total: usize) {
        println!("\nScan complete: {scanned}/{total} scanned, {skipped} skipped");
    }
}

/// No-op progress for tests and embedding.
pub struct SilentProgress;

impl ScanProgress for SilentProgress {
    fn on_start(&self, _symbol: &str, _index: usize, _total: usize) {}

    fn on_complete(
        &self,
        _symbol: &str,
        _index: usize,
        _total: usize,
        _result: Result<usize, &DataUnavailable>,
    ) {
    }

    fn on_batch_complete(&self, _scanned: usize, _skipped: usize, _total: usize) {}
}
