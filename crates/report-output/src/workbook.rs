//! Workbook-sheet export.
//!
//! The spreadsheet itself is assembled by an external collaborator; this
//! module emits the two sheet-shaped tables as headered delimited files with
//! the upstream column names and no index column.

use std::path::{Path, PathBuf};

use report_core::error::Result;
use report_core::models::{DeviceMonthRow, ReportRow};
use serde::Serialize;

/// Sheet name of the per-device aggregate.
pub const AGGREGATIONS_SHEET: &str = "Aggregations";
/// Sheet name of the month-over-month report.
pub const MOM_SHEET: &str = "Month-over-Month";

// ── Sheet wire formats ────────────────────────────────────────────────────────

/// Field order defines the column order of the `Aggregations` sheet.
#[derive(Debug, Serialize)]
struct AggregationsSheetRow<'a> {
    #[serde(rename = "dim_deviceCategory")]
    device_category: &'a str,
    #[serde(rename = "dim_month")]
    month: u32,
    #[serde(rename = "dim_year")]
    year: i32,
    transactions: u64,
    #[serde(rename = "QTY")]
    quantity: u64,
    sessions: u64,
    #[serde(rename = "ECR")]
    ecr: f64,
    items_per_transaction: f64,
}

/// Field order defines the column order of the `Month-over-Month` sheet.
#[derive(Debug, Serialize)]
struct MomSheetRow {
    #[serde(rename = "dim_month")]
    month: u32,
    #[serde(rename = "dim_year")]
    year: i32,
    transactions: f64,
    #[serde(rename = "QTY")]
    quantity: f64,
    sessions: f64,
    #[serde(rename = "ECR")]
    ecr: f64,
    items_per_transaction: f64,
    #[serde(rename = "addsToCart")]
    adds_to_cart: f64,
    purchase_rate: f64,
    #[serde(rename = "type")]
    label: &'static str,
}

// ── Export ────────────────────────────────────────────────────────────────────

/// Write both workbook sheets under `out_dir`, returning the written paths.
pub fn write_workbook(
    out_dir: &Path,
    aggregate: &[DeviceMonthRow],
    report: &[ReportRow],
) -> Result<Vec<PathBuf>> {
    let aggregations_path = out_dir.join(format!("{}.csv", AGGREGATIONS_SHEET));
    write_sheet(&aggregations_path, aggregate.iter().map(|row| {
        AggregationsSheetRow {
            device_category: &row.device_category,
            month: row.key.month,
            year: row.key.year,
            transactions: row.transactions,
            quantity: row.quantity,
            sessions: row.sessions,
            ecr: row.ecr,
            items_per_transaction: row.items_per_transaction,
        }
    }))?;

    let mom_path = out_dir.join(format!("{}.csv", MOM_SHEET));
    write_sheet(&mom_path, report.iter().map(|row| MomSheetRow {
        month: row.key.month,
        year: row.key.year,
        transactions: row.measures.transactions,
        quantity: row.measures.quantity,
        sessions: row.measures.sessions,
        ecr: row.measures.ecr,
        items_per_transaction: row.measures.items_per_transaction,
        adds_to_cart: row.measures.adds_to_cart,
        purchase_rate: row.measures.purchase_rate,
        label: row.label.as_str(),
    }))?;

    Ok(vec![aggregations_path, mom_path])
}

/// Serialize `rows` to `path` as headered CSV.
///
/// Writes to a temp file then renames for atomicity.
fn write_sheet<R: Serialize>(path: &Path, rows: impl Iterator<Item = R>) -> Result<()> {
    let tmp = path.with_extension("csv.tmp");

    {
        let mut writer = csv::WriterBuilder::new().from_path(&tmp)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }

    std::fs::rename(&tmp, path)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
