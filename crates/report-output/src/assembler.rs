//! Assembly of the long-format month-over-month report.
//!
//! Concatenates the current-month slice with the three derived views into a
//! single table grouped by transform type. The result is deliberately NOT
//! re-sorted chronologically: each block keeps its own ascending order.

use report_core::models::{MomRow, ReportRow, TransformLabel};
use report_core::transforms::TransformKind;

/// Build the final report from a key-sorted month-over-month table.
///
/// Block order is fixed: `current_month` rows (minus the first, which has no
/// prior month to compare against), then `last_month`, then
/// `relative_difference`, then `absolute_difference`. Every block holds N−1
/// rows for an N-row input, so the report holds 4×(N−1).
pub fn assemble_report(mom: &[MomRow]) -> Vec<ReportRow> {
    let mut report: Vec<ReportRow> = mom
        .iter()
        .skip(1)
        .map(|row| ReportRow {
            label: TransformLabel::CurrentMonth,
            key: row.key,
            measures: row.measures,
        })
        .collect();

    for kind in TransformKind::ALL {
        report.extend(kind.apply(mom));
    }

    report
}

// ── Tests ─────────────────────────────────────────────────────────────────────
