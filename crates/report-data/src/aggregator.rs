//! Session aggregation over device and month groupings.
//!
//! Collapses the raw per-(date, device) session log into the two tables the
//! rest of the pipeline consumes: a per-(device, month) aggregate and a
//! per-month aggregate across all devices.

use std::collections::BTreeMap;

use report_core::models::{DeviceMonthRow, MonthKey, MonthlyRow, SessionRecord};

// ── GroupTotals ───────────────────────────────────────────────────────────────

/// Count measures accumulated within one aggregation group.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupTotals {
    pub transactions: u64,
    pub quantity: u64,
    pub sessions: u64,
}

impl GroupTotals {
    /// Add a single record's counts to the running totals.
    pub fn add_record(&mut self, record: &SessionRecord) {
        self.transactions += record.transactions;
        self.quantity += record.quantity;
        self.sessions += record.sessions;
    }

    /// Session-to-transaction conversion rate. A zero-session group yields
    /// the IEEE-754 division result, not an error.
    pub fn ecr(&self) -> f64 {
        self.transactions as f64 / self.sessions as f64
    }

    /// Quantity per transaction, with the same division convention.
    pub fn items_per_transaction(&self) -> f64 {
        self.quantity as f64 / self.transactions as f64
    }
}

// ── SessionAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that groups session records by calendar period.
pub struct SessionAggregator;

impl SessionAggregator {
    /// Aggregate by (month, year, device category).
    ///
    /// Returns rows sorted ascending by (year, month), then device category
    /// within a month.
    pub fn aggregate_by_device(records: &[SessionRecord]) -> Vec<DeviceMonthRow> {
        let grouped = Self::aggregate_by_key(records, |r| {
            (MonthKey::from_date(r.date), r.device_category.clone())
        });

        grouped
            .into_iter()
            .map(|((key, device_category), totals)| DeviceMonthRow {
                device_category,
                key,
                transactions: totals.transactions,
                quantity: totals.quantity,
                sessions: totals.sessions,
                ecr: totals.ecr(),
                items_per_transaction: totals.items_per_transaction(),
            })
            .collect()
    }

    /// Aggregate by (month, year) across all devices.
    ///
    /// Returns rows sorted ascending by (year, month). This is the input to
    /// the cart-adds merge.
    pub fn aggregate_monthly(records: &[SessionRecord]) -> Vec<MonthlyRow> {
        let grouped = Self::aggregate_by_key(records, |r| MonthKey::from_date(r.date));

        grouped
            .into_iter()
            .map(|(key, totals)| MonthlyRow {
                key,
                transactions: totals.transactions,
                quantity: totals.quantity,
                sessions: totals.sessions,
                ecr: totals.ecr(),
                items_per_transaction: totals.items_per_transaction(),
            })
            .collect()
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Generic aggregation driver.
    ///
    /// `key_fn` maps a record to its group key; the BTreeMap keeps groups in
    /// ascending key order.
    fn aggregate_by_key<K: Ord>(
        records: &[SessionRecord],
        key_fn: impl Fn(&SessionRecord) -> K,
    ) -> BTreeMap<K, GroupTotals> {
        let mut map: BTreeMap<K, GroupTotals> = BTreeMap::new();
        for record in records {
            map.entry(key_fn(record)).or_default().add_record(record);
        }
        map
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
