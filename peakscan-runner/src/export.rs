//! Result table export (CSV and JSON).

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Write serializable rows as a CSV table with a header row.
pub fn write_rows_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create CSV {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render rows as an in-memory CSV string (header + rows), for display.
pub fn rows_to_csv_string<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flush CSV buffer: {e}"))?;
    Ok(String::from_utf8(bytes).context("CSV output was not UTF-8")?)
}

/// Write any serializable value as pretty JSON (summaries, skip ledgers).
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize value")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write JSON {}", path.display()))?;
    Ok(())
}
