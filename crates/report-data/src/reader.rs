//! Delimited-file loading for the reporting pipeline.
//!
//! Reads the session/transaction log and the adds-to-cart series exported by
//! the analytics platform and converts them into typed records for
//! downstream processing.

use std::path::{Path, PathBuf};

use report_core::dates::DateParser;
use report_core::error::{ReportError, Result};
use report_core::models::{CartAdds, SessionRecord};
use serde::Deserialize;
use tracing::{debug, warn};

// ── Wire formats ──────────────────────────────────────────────────────────────

/// One row of the session-counts file as exported: dates are strings in one
/// of several formats, so parsing happens in a second step.
#[derive(Debug, Deserialize)]
struct RawSessionRow {
    #[serde(rename = "dim_date")]
    date: String,
    #[serde(rename = "dim_deviceCategory")]
    device_category: String,
    transactions: u64,
    #[serde(rename = "QTY")]
    quantity: u64,
    sessions: u64,
}

/// One row of the adds-to-cart file.
#[derive(Debug, Deserialize)]
struct RawCartRow {
    #[serde(rename = "dim_month")]
    month: u32,
    #[serde(rename = "addsToCart")]
    adds_to_cart: u64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and parse the session-counts file into [`SessionRecord`]s.
///
/// Rows that fail to deserialize or carry an unparseable date are skipped
/// with a WARN log. A file that yields zero usable rows is a fatal error.
pub fn load_session_records(path: &Path) -> Result<Vec<SessionRecord>> {
    let mut reader = open_csv(path)?;

    let mut records: Vec<SessionRecord> = Vec::new();
    let mut rows_read = 0u64;
    let mut rows_skipped = 0u64;

    for row in reader.deserialize::<RawSessionRow>() {
        rows_read += 1;
        let raw = match row {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping malformed row in {}: {}", path.display(), e);
                rows_skipped += 1;
                continue;
            }
        };

        let Some(date) = DateParser::parse(&raw.date) else {
            warn!(
                "Skipping row with unparseable date \"{}\" in {}",
                raw.date,
                path.display()
            );
            rows_skipped += 1;
            continue;
        };

        records.push(SessionRecord {
            date,
            device_category: raw.device_category,
            transactions: raw.transactions,
            quantity: raw.quantity,
            sessions: raw.sessions,
        });
    }

    debug!(
        "File {}: {} rows read, {} skipped, {} mapped",
        path.display(),
        rows_read,
        rows_skipped,
        records.len()
    );

    if records.is_empty() {
        return Err(ReportError::EmptyInput(path.to_path_buf()));
    }
    Ok(records)
}

/// Load and parse the adds-to-cart series.
///
/// Same row policy as [`load_session_records`]: malformed rows are skipped
/// with a WARN log, an empty result is fatal.
pub fn load_cart_adds(path: &Path) -> Result<Vec<CartAdds>> {
    let mut reader = open_csv(path)?;

    let mut rows: Vec<CartAdds> = Vec::new();
    let mut rows_skipped = 0u64;

    for row in reader.deserialize::<RawCartRow>() {
        match row {
            Ok(raw) => rows.push(CartAdds {
                month: raw.month,
                adds_to_cart: raw.adds_to_cart,
            }),
            Err(e) => {
                warn!("Skipping malformed row in {}: {}", path.display(), e);
                rows_skipped += 1;
            }
        }
    }

    debug!(
        "File {}: {} rows mapped, {} skipped",
        path.display(),
        rows.len(),
        rows_skipped
    );

    if rows.is_empty() {
        return Err(ReportError::EmptyInput(path.to_path_buf()));
    }
    Ok(rows)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Open a headered CSV reader over `path`, surfacing missing files and read
/// failures with the offending path attached.
fn open_csv(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    if !path.exists() {
        return Err(ReportError::InputNotFound(path.to_path_buf()));
    }

    let file = std::fs::File::open(path).map_err(|source| ReportError::FileRead {
        path: PathBuf::from(path),
        source,
    })?;

    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
