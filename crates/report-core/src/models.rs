use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ── MonthKey ──────────────────────────────────────────────────────────────────

/// The (year, month) pair identifying a row's calendar period.
///
/// Field order matters: the derived `Ord` sorts by year first, then month,
/// which is the ascending calendar order every table in the pipeline uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Derive the key from a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Month number rendered as a string, used as the categorical axis label
    /// on the exported chart series.
    pub fn month_label(&self) -> String {
        self.month.to_string()
    }
}

// ── SessionRecord ─────────────────────────────────────────────────────────────

/// One raw row of the session/transaction log: a single (date, device)
/// observation with its count measures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Calendar date of the observation.
    pub date: NaiveDate,
    /// Device category the sessions were recorded on (desktop, mobile, ...).
    pub device_category: String,
    /// Number of completed transactions.
    pub transactions: u64,
    /// Quantity of items purchased.
    pub quantity: u64,
    /// Number of sessions.
    pub sessions: u64,
}

// ── CartAdds ──────────────────────────────────────────────────────────────────

/// One row of the external adds-to-cart series, keyed by month number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartAdds {
    /// Calendar month number (1-12).
    pub month: u32,
    /// Count of add-to-cart events in that month.
    pub adds_to_cart: u64,
}

// ── DeviceMonthRow ────────────────────────────────────────────────────────────

/// Per-(device, month) aggregate with summed counts and derived ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceMonthRow {
    pub device_category: String,
    pub key: MonthKey,
    pub transactions: u64,
    pub quantity: u64,
    pub sessions: u64,
    /// Session-to-transaction conversion rate: transactions / sessions.
    pub ecr: f64,
    /// Quantity / transactions.
    pub items_per_transaction: f64,
}

// ── MonthlyRow ────────────────────────────────────────────────────────────────

/// Per-month aggregate across all devices, before the cart-adds merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRow {
    pub key: MonthKey,
    pub transactions: u64,
    pub quantity: u64,
    pub sessions: u64,
    pub ecr: f64,
    pub items_per_transaction: f64,
}

// ── MomMeasures ───────────────────────────────────────────────────────────────

/// The numeric measures of one month-over-month row.
///
/// Every field participates in every temporal transform; the temporal key is
/// deliberately not part of this struct so the transforms operate on purely
/// numeric data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MomMeasures {
    pub transactions: f64,
    pub quantity: f64,
    pub sessions: f64,
    pub ecr: f64,
    pub items_per_transaction: f64,
    pub adds_to_cart: f64,
    pub purchase_rate: f64,
}

impl MomMeasures {
    /// Apply `f(current, prior)` to each measure pairwise, producing the
    /// derived measures for one output row of a temporal transform.
    pub fn combine(current: &Self, prior: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self {
            transactions: f(current.transactions, prior.transactions),
            quantity: f(current.quantity, prior.quantity),
            sessions: f(current.sessions, prior.sessions),
            ecr: f(current.ecr, prior.ecr),
            items_per_transaction: f(current.items_per_transaction, prior.items_per_transaction),
            adds_to_cart: f(current.adds_to_cart, prior.adds_to_cart),
            purchase_rate: f(current.purchase_rate, prior.purchase_rate),
        }
    }

    /// The measures as a fixed-order array, used by tests and the chart
    /// shaping code.
    pub fn as_array(&self) -> [f64; 7] {
        [
            self.transactions,
            self.quantity,
            self.sessions,
            self.ecr,
            self.items_per_transaction,
            self.adds_to_cart,
            self.purchase_rate,
        ]
    }
}

// ── MomRow ────────────────────────────────────────────────────────────────────

/// One month of the month-over-month table: temporal key plus measures.
///
/// A transform input holds these sorted ascending by key with no duplicate
/// keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomRow {
    pub key: MonthKey,
    pub measures: MomMeasures,
}

// ── TransformLabel ────────────────────────────────────────────────────────────

/// Identifies which view of the data a report row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformLabel {
    /// The raw value for the labelled month.
    CurrentMonth,
    /// The raw value for the month before the labelled month.
    LastMonth,
    /// Percent change from the prior month.
    RelativeDifference,
    /// Difference from the prior month.
    AbsoluteDifference,
}

impl TransformLabel {
    /// The wire string written to the report's `type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransformLabel::CurrentMonth => "current_month",
            TransformLabel::LastMonth => "last_month",
            TransformLabel::RelativeDifference => "relative_difference",
            TransformLabel::AbsoluteDifference => "absolute_difference",
        }
    }
}

impl std::fmt::Display for TransformLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ReportRow ─────────────────────────────────────────────────────────────────

/// One row of the final long-format month-over-month report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub label: TransformLabel,
    pub key: MonthKey,
    pub measures: MomMeasures,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
