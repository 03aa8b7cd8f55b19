//! Top-level batch pipeline.
//!
//! Single-threaded and single-pass: load both inputs, aggregate, merge,
//! assemble the report, export the workbook sheets and chart series. The run
//! either completes fully or fails on the first unhandled fault; identical
//! inputs produce byte-identical output files.

use std::path::PathBuf;

use report_core::error::Result;
use report_core::settings::Settings;
use report_data::aggregator::SessionAggregator;
use report_data::merger::merge_with_cart_adds;
use report_data::reader::{load_cart_adds, load_session_records};
use tracing::{debug, info};

use crate::assembler::assemble_report;
use crate::charts::write_chart_series;
use crate::workbook::write_workbook;

// ── RunSummary ────────────────────────────────────────────────────────────────

/// Counts produced by one pipeline run, for the closing log line.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunSummary {
    /// Session records loaded from the session-counts file.
    pub records_read: usize,
    /// Rows loaded from the adds-to-cart file.
    pub cart_rows_read: usize,
    /// Rows in the per-device aggregate.
    pub device_rows: usize,
    /// Months surviving the cart-adds merge.
    pub months_merged: usize,
    /// Rows in the assembled month-over-month report.
    pub report_rows: usize,
    /// Every file written under the output directory.
    pub files_written: Vec<PathBuf>,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full reporting pipeline.
///
/// 1. Load the session log and the adds-to-cart series.
/// 2. Aggregate sessions by (device, month) and by month.
/// 3. Merge the monthly aggregate with cart adds.
/// 4. Assemble the long-format month-over-month report.
/// 5. Export the two workbook sheets and the three chart series.
pub fn run(settings: &Settings) -> Result<RunSummary> {
    let session_path = settings.session_path();
    let cart_path = settings.cart_path();
    debug!(
        "Reading inputs: {} and {}",
        session_path.display(),
        cart_path.display()
    );

    let records = load_session_records(&session_path)?;
    let cart = load_cart_adds(&cart_path)?;

    let device_rows = SessionAggregator::aggregate_by_device(&records);
    let monthly = SessionAggregator::aggregate_monthly(&records);
    let mom = merge_with_cart_adds(&monthly, &cart);
    let report = assemble_report(&mom);

    std::fs::create_dir_all(&settings.out_dir)?;
    let mut files_written = write_workbook(&settings.out_dir, &device_rows, &report)?;
    files_written.extend(write_chart_series(&settings.out_dir, &device_rows, &report)?);

    info!(
        "Pipeline complete: {} records -> {} device rows, {} merged months, {} report rows, {} files",
        records.len(),
        device_rows.len(),
        mom.len(),
        report.len(),
        files_written.len()
    );

    Ok(RunSummary {
        records_read: records.len(),
        cart_rows_read: cart.len(),
        device_rows: device_rows.len(),
        months_merged: mom.len(),
        report_rows: report.len(),
        files_written,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
