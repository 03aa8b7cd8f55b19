//! Chart-series shaping for the external renderer.
//!
//! Rendering itself is out of scope; this module only shapes the three
//! line-plot datasets and writes them as JSON files the renderer consumes.
//! The month axis is categorical: month numbers rendered as strings.

use std::path::{Path, PathBuf};

use report_core::error::Result;
use report_core::models::{DeviceMonthRow, ReportRow, TransformLabel};
use serde::Serialize;

// ── Series model ──────────────────────────────────────────────────────────────

/// One (x, y) point of a line series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Categorical month label.
    pub month: String,
    pub value: f64,
}

/// One named line of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

/// A complete shaped dataset for one line chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub series: Vec<ChartSeries>,
}

// ── Shaping ───────────────────────────────────────────────────────────────────

/// Transactions by month, one series per device category.
pub fn transactions_by_device(rows: &[DeviceMonthRow]) -> ChartData {
    ChartData {
        title: "transactions".to_string(),
        x_label: "Month".to_string(),
        y_label: "Transactions".to_string(),
        legend_title: "Device".to_string(),
        series: device_series(rows, |r| r.transactions as f64),
    }
}

/// Conversion rate by month, one series per device category.
pub fn ecr_by_device(rows: &[DeviceMonthRow]) -> ChartData {
    ChartData {
        title: "ECR".to_string(),
        x_label: "Month".to_string(),
        y_label: "ECR".to_string(),
        legend_title: "Device".to_string(),
        series: device_series(rows, |r| r.ecr),
    }
}

/// Purchase rate by month, one series per transform label.
pub fn purchase_rate_by_type(report: &[ReportRow]) -> ChartData {
    const LABEL_ORDER: [TransformLabel; 4] = [
        TransformLabel::CurrentMonth,
        TransformLabel::LastMonth,
        TransformLabel::RelativeDifference,
        TransformLabel::AbsoluteDifference,
    ];

    let series = LABEL_ORDER
        .iter()
        .map(|&label| ChartSeries {
            name: label.to_string(),
            points: report
                .iter()
                .filter(|r| r.label == label)
                .map(|r| ChartPoint {
                    month: r.key.month_label(),
                    value: r.measures.purchase_rate,
                })
                .collect(),
        })
        .filter(|s| !s.points.is_empty())
        .collect();

    ChartData {
        title: "Purchase_Rate".to_string(),
        x_label: "Month".to_string(),
        y_label: "Purchase Rate".to_string(),
        legend_title: "Data Format".to_string(),
        series,
    }
}

/// Group device rows into one series per device, first-seen order, taking
/// the y value from `measure`.
fn device_series(rows: &[DeviceMonthRow], measure: impl Fn(&DeviceMonthRow) -> f64) -> Vec<ChartSeries> {
    let mut series: Vec<ChartSeries> = Vec::new();

    for row in rows {
        let point = ChartPoint {
            month: row.key.month_label(),
            value: measure(row),
        };
        match series.iter_mut().find(|s| s.name == row.device_category) {
            Some(existing) => existing.points.push(point),
            None => series.push(ChartSeries {
                name: row.device_category.clone(),
                points: vec![point],
            }),
        }
    }

    series
}

// ── Export ────────────────────────────────────────────────────────────────────

/// Write the three chart datasets as pretty-printed JSON under `out_dir`.
///
/// Returns the written paths in a fixed order.
pub fn write_chart_series(
    out_dir: &Path,
    aggregate: &[DeviceMonthRow],
    report: &[ReportRow],
) -> Result<Vec<PathBuf>> {
    let datasets = [
        ("transactions_by_device.json", transactions_by_device(aggregate)),
        ("ecr_by_device.json", ecr_by_device(aggregate)),
        ("purchase_rate_by_type.json", purchase_rate_by_type(report)),
    ];

    let mut written = Vec::with_capacity(datasets.len());
    for (name, data) in datasets {
        let path = out_dir.join(name);
        let json = serde_json::to_string_pretty(&data)?;
        std::fs::write(&path, json)?;
        written.push(path);
    }
    Ok(written)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use report_core::models::{MomMeasures, MonthKey};

    fn device_row(device: &str, month: u32, transactions: u64, ecr: f64) -> DeviceMonthRow {
        DeviceMonthRow {
            device_category: device.to_string(),
            key: MonthKey::new(2013, month),
            transactions,
            quantity: transactions * 2,
            sessions: transactions * 10,
            ecr,
            items_per_transaction: 2.0,
        }
    }

    fn report_row(label: TransformLabel, month: u32, purchase_rate: f64) -> ReportRow {
        ReportRow {
            label,
            key: MonthKey::new(2013, month),
            measures: MomMeasures {
                purchase_rate,
                ..MomMeasures::default()
            },
        }
    }

    #[test]
    fn test_transactions_one_series_per_device() {
        let rows = vec![
            device_row("desktop", 1, 100, 0.05),
            device_row("mobile", 1, 20, 0.02),
            device_row("desktop", 2, 110, 0.06),
            device_row("mobile", 2, 25, 0.03),
        ];
        let chart = transactions_by_device(&rows);

        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "desktop");
        assert_eq!(chart.series[0].points.len(), 2);
        assert_eq!(chart.series[0].points[1].month, "2");
        assert_eq!(chart.series[0].points[1].value, 110.0);
        assert_eq!(chart.legend_title, "Device");
    }

    #[test]
    fn test_ecr_chart_uses_ratio_measure() {
        let rows = vec![device_row("tablet", 3, 50, 0.04)];
        let chart = ecr_by_device(&rows);

        assert_eq!(chart.y_label, "ECR");
        assert_eq!(chart.series[0].points[0].value, 0.04);
    }

    #[test]
    fn test_month_labels_are_strings() {
        let rows = vec![device_row("desktop", 12, 10, 0.01)];
        let chart = transactions_by_device(&rows);
        assert_eq!(chart.series[0].points[0].month, "12");
    }

    #[test]
    fn test_purchase_rate_one_series_per_label_in_fixed_order() {
        let report = vec![
            report_row(TransformLabel::CurrentMonth, 2, 0.5),
            report_row(TransformLabel::LastMonth, 2, 0.4),
            report_row(TransformLabel::RelativeDifference, 2, 0.25),
            report_row(TransformLabel::AbsoluteDifference, 2, 0.1),
        ];
        let chart = purchase_rate_by_type(&report);

        let names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "current_month",
                "last_month",
                "relative_difference",
                "absolute_difference",
            ]
        );
        assert_eq!(chart.legend_title, "Data Format");
    }

    #[test]
    fn test_purchase_rate_skips_absent_labels() {
        let report = vec![report_row(TransformLabel::CurrentMonth, 2, 0.5)];
        let chart = purchase_rate_by_type(&report);
        assert_eq!(chart.series.len(), 1);
    }

    #[test]
    fn test_write_chart_series_creates_three_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let rows = vec![device_row("desktop", 1, 100, 0.05)];
        let report = vec![report_row(TransformLabel::CurrentMonth, 2, 0.5)];

        let written = write_chart_series(dir.path(), &rows, &report).unwrap();

        assert_eq!(written.len(), 3);
        for path in &written {
            assert!(path.exists(), "{} must exist", path.display());
        }
        let json = std::fs::read_to_string(&written[0]).unwrap();
        assert!(json.contains("\"Transactions\""));
        assert!(json.contains("\"desktop\""));
    }
}
