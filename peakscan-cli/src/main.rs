//! PeakScan CLI — run scans and inspect scan history.
//!
//! Commands:
//! - `scan-returns` — flag tickers whose windowed return is at or below the threshold
//! - `scan-pattern` — detect lifetime highs that held as support and appreciated
//! - `history` — list saved daily scan files
//!
//! Scheduling is the caller's business: point cron (or any trigger) at this
//! binary; the engine itself holds no state between invocations.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use peakscan_core::data::{CircuitBreaker, PriceProvider, SyntheticProvider, YahooProvider};
use peakscan_core::scan::StdoutProgress;
use peakscan_runner::{scan_pattern, scan_returns, HistoryStore, ScanConfig};

#[derive(Parser)]
#[command(name = "peakscan", about = "PeakScan CLI — equity scan/detection engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flag tickers whose total return over the lookback window is at or
    /// below --min-return (the inverted sense is deliberate: this finds
    /// underperformers).
    ScanReturns {
        /// Tickers to scan (e.g. AAPL TCS.NS). Empty means the universe.
        tickers: Vec<String>,

        /// Path to a universe TOML file (used when no tickers are given).
        #[arg(long)]
        universe: Option<PathBuf>,

        /// Keep tickers returning at or below this percentage.
        #[arg(long, default_value_t = 0.0)]
        min_return: f64,

        /// Lookback window in years.
        #[arg(long, default_value_t = 7)]
        years: u32,

        /// Directory for daily scan history CSVs.
        #[arg(long, default_value = "scan_history")]
        history_dir: PathBuf,

        /// Use deterministic synthetic data instead of Yahoo Finance.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Skip writing the daily history file.
        #[arg(long, default_value_t = false)]
        no_save: bool,
    },
    /// Detect tickers that hit a lifetime high, held it as support, and
    /// appreciated past the threshold.
    ScanPattern {
        /// Tickers to scan. Empty means the universe.
        tickers: Vec<String>,

        /// Path to a universe TOML file (used when no tickers are given).
        #[arg(long)]
        universe: Option<PathBuf>,

        /// Appreciation threshold in percent (10 = 10%).
        #[arg(long, default_value_t = 10.0)]
        threshold: f64,

        /// Summary success threshold in percent.
        #[arg(long, default_value_t = 10.0)]
        success_threshold: f64,

        /// History depth in years.
        #[arg(long, default_value_t = 10)]
        history_years: u32,

        /// Directory for daily scan history CSVs.
        #[arg(long, default_value = "scan_history")]
        history_dir: PathBuf,

        /// Use deterministic synthetic data instead of Yahoo Finance.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Skip writing the daily history file.
        #[arg(long, default_value_t = false)]
        no_save: bool,
    },
    /// List saved daily scan files.
    History {
        /// Directory for daily scan history CSVs.
        #[arg(long, default_value = "scan_history")]
        history_dir: PathBuf,
    },
}

fn build_provider(synthetic: bool) -> Result<Box<dyn PriceProvider>> {
    if synthetic {
        Ok(Box::new(SyntheticProvider::default_walk()))
    } else {
        let breaker = Arc::new(CircuitBreaker::default_provider());
        let provider = YahooProvider::new(breaker)?;
        Ok(Box::new(provider))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let today: NaiveDate = Local::now().date_naive();

    match cli.command {
        Commands::ScanReturns {
            tickers,
            universe,
            min_return,
            years,
            history_dir,
            synthetic,
            no_save,
        } => {
            let config = ScanConfig {
                min_return,
                years,
                tickers,
                universe_file: universe,
                history_dir: history_dir.clone(),
                ..ScanConfig::default()
            };
            let provider = build_provider(synthetic)?;
            let result = scan_returns(&config, provider.as_ref(), today, &StdoutProgress)?;

            println!("\nTickers at or below {min_return}% over {years}y:");
            if result.rows.is_empty() {
                println!("  (none)");
            }
            for row in &result.rows {
                println!("  {:<12} {:>8.2}%", row.symbol, row.return_pct);
            }
            if !result.skipped.is_empty() {
                println!("Skipped {} tickers (no usable data)", result.skipped.len());
            }

            if !no_save {
                let store = HistoryStore::new(history_dir);
                let path = store.append(today, &result.rows)?;
                println!("Saved to {}", path.display());
            }
        }
        Commands::ScanPattern {
            tickers,
            universe,
            threshold,
            success_threshold,
            history_years,
            history_dir,
            synthetic,
            no_save,
        } => {
            let config = ScanConfig {
                appreciation_threshold: threshold,
                success_threshold,
                history_years,
                tickers,
                universe_file: universe,
                history_dir: history_dir.clone(),
                ..ScanConfig::default()
            };
            let provider = build_provider(synthetic)?;
            let result = scan_pattern(&config, provider.as_ref(), today, &StdoutProgress)?;

            println!("\nLifetime-high occurrences (>= {threshold}% appreciation):");
            if result.occurrences.is_empty() {
                println!("  (none)");
            }
            for occ in &result.occurrences {
                println!(
                    "  {:<12} {}  high {:>10.2}  +{:.2}%",
                    occ.symbol, occ.date, occ.lifetime_high, occ.appreciation_pct
                );
            }

            let summary = &result.summary;
            println!("\nTotal occurrences:      {}", summary.total_instances);
            println!(
                "Above {:.1}% threshold: {}",
                success_threshold, summary.successful_instances
            );
            println!("Success rate:           {:.2}%", summary.success_rate);
            if !summary.by_year.is_empty() {
                println!("Occurrences by year:");
                for (year, count) in &summary.by_year {
                    println!("  {year}: {count}");
                }
            }
            if !result.skipped.is_empty() {
                println!("Skipped {} tickers (no usable data)", result.skipped.len());
            }

            if !no_save {
                let store = HistoryStore::new(history_dir);
                let path = store.append(today, &result.occurrences)?;
                println!("Saved to {}", path.display());
            }
        }
        Commands::History { history_dir } => {
            let store = HistoryStore::new(history_dir);
            let files = store.list()?;
            if files.is_empty() {
                bail!(
                    "no scan history in {} — run a scan first",
                    store.dir().display()
                );
            }
            for file in files {
                println!("{file}");
            }
        }
    }

    Ok(())
}
