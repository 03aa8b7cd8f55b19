//! Month-over-month temporal transforms.
//!
//! The three views (relative change, absolute change, prior-month value)
//! share one shape contract: an N-row month table in, N−1 rows out, the
//! first row dropped, and the original temporal keys re-attached to the
//! surviving rows. Only the per-cell operator differs, so the whole family
//! is a single operation parameterized by [`TransformKind`].

use crate::models::{MomMeasures, MomRow, MonthKey, ReportRow, TransformLabel};

// ── Time-key extraction ───────────────────────────────────────────────────────

/// Split a month table into its temporal key sequence and its purely numeric
/// measures, in row order.
///
/// The key sequence identifies calendar time; callers must hand the SAME
/// sequence back to [`attach_time_key`], never a shifted or derived copy.
pub fn split_time_key(rows: &[MomRow]) -> (Vec<MonthKey>, Vec<MomMeasures>) {
    let keys = rows.iter().map(|r| r.key).collect();
    let measures = rows.iter().map(|r| r.measures).collect();
    (keys, measures)
}

/// Re-attach temporal keys to transformed measures and tag every row with
/// `label`.
///
/// `keys` and `measures` must have equal length; the pairing is positional.
pub fn attach_time_key(
    keys: &[MonthKey],
    measures: Vec<MomMeasures>,
    label: TransformLabel,
) -> Vec<ReportRow> {
    debug_assert_eq!(keys.len(), measures.len());
    keys.iter()
        .zip(measures)
        .map(|(&key, measures)| ReportRow {
            label,
            key,
            measures,
        })
        .collect()
}

// ── TransformKind ─────────────────────────────────────────────────────────────

/// The three month-over-month views, distinguished only by how a (current,
/// prior) cell pair combines into an output cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    /// `(current − prior) / prior`. A zero prior value propagates the
    /// IEEE-754 result (±inf, or NaN for 0/0) rather than erroring.
    RelativeChange,
    /// `current − prior`.
    AbsoluteChange,
    /// `prior`, unmodified.
    LaggedValue,
}

impl TransformKind {
    /// All kinds in the order their blocks appear in the assembled report.
    pub const ALL: [TransformKind; 3] = [
        TransformKind::LaggedValue,
        TransformKind::RelativeChange,
        TransformKind::AbsoluteChange,
    ];

    /// The label attached to every output row of this transform.
    pub fn label(&self) -> TransformLabel {
        match self {
            TransformKind::RelativeChange => TransformLabel::RelativeDifference,
            TransformKind::AbsoluteChange => TransformLabel::AbsoluteDifference,
            TransformKind::LaggedValue => TransformLabel::LastMonth,
        }
    }

    /// The per-cell combining operator.
    fn cell(&self, current: f64, prior: f64) -> f64 {
        match self {
            TransformKind::RelativeChange => (current - prior) / prior,
            TransformKind::AbsoluteChange => current - prior,
            TransformKind::LaggedValue => prior,
        }
    }

    /// Apply this transform to a month table sorted ascending by key.
    ///
    /// Output row i (for input row i ≥ 1) combines input rows i and i−1 and
    /// carries the ORIGINAL key of input row i. Row 0 has no prior row and is
    /// dropped, so N input rows yield N−1 output rows. Note the resulting
    /// convention for [`TransformKind::LaggedValue`]: the row labelled month
    /// M shows month M−1's values.
    pub fn apply(&self, rows: &[MomRow]) -> Vec<ReportRow> {
        if rows.len() < 2 {
            return Vec::new();
        }

        let (keys, measures) = split_time_key(rows);

        let derived: Vec<MomMeasures> = measures
            .windows(2)
            .map(|pair| MomMeasures::combine(&pair[1], &pair[0], |c, p| self.cell(c, p)))
            .collect();

        attach_time_key(&keys[1..], derived, self.label())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn measures(value: f64) -> MomMeasures {
        MomMeasures {
            transactions: value,
            quantity: value * 2.0,
            sessions: value * 3.0,
            ecr: value / 10.0,
            items_per_transaction: value / 20.0,
            adds_to_cart: value * 4.0,
            purchase_rate: value / 40.0,
        }
    }

    fn row(year: i32, month: u32, value: f64) -> MomRow {
        MomRow {
            key: MonthKey::new(year, month),
            measures: measures(value),
        }
    }

    fn table(values: &[f64]) -> Vec<MomRow> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| row(2012, i as u32 + 1, v))
            .collect()
    }

    // ── split / attach ────────────────────────────────────────────────────────

    #[test]
    fn test_split_time_key_preserves_row_order() {
        let rows = table(&[100.0, 110.0, 90.0]);
        let (keys, measures) = split_time_key(&rows);

        assert_eq!(keys.len(), 3);
        assert_eq!(measures.len(), 3);
        assert_eq!(keys[0], MonthKey::new(2012, 1));
        assert_eq!(keys[2], MonthKey::new(2012, 3));
        assert_eq!(measures[1].transactions, 110.0);
    }

    #[test]
    fn test_attach_time_key_pairs_positionally() {
        let rows = table(&[100.0, 110.0]);
        let (keys, measures) = split_time_key(&rows);
        let attached = attach_time_key(&keys, measures, TransformLabel::CurrentMonth);

        assert_eq!(attached.len(), 2);
        assert_eq!(attached[0].key, MonthKey::new(2012, 1));
        assert_eq!(attached[0].label, TransformLabel::CurrentMonth);
        assert_eq!(attached[1].measures.transactions, 110.0);
    }

    // ── Shape contract ────────────────────────────────────────────────────────

    #[test]
    fn test_every_transform_drops_exactly_one_row() {
        for n in 2..=6 {
            let values: Vec<f64> = (1..=n).map(|i| i as f64 * 10.0).collect();
            let rows = table(&values);
            for kind in TransformKind::ALL {
                assert_eq!(kind.apply(&rows).len(), n - 1, "{:?} with N={}", kind, n);
            }
        }
    }

    #[test]
    fn test_output_keys_are_original_keys_offset_by_one() {
        let rows = table(&[100.0, 110.0, 90.0]);
        for kind in TransformKind::ALL {
            let out = kind.apply(&rows);
            assert_eq!(out[0].key, MonthKey::new(2012, 2));
            assert_eq!(out[1].key, MonthKey::new(2012, 3));
        }
    }

    // ── Worked example: transactions [100, 110, 90] over months [1, 2, 3] ────

    #[test]
    fn test_absolute_change_values() {
        let out = TransformKind::AbsoluteChange.apply(&table(&[100.0, 110.0, 90.0]));
        assert_eq!(out[0].measures.transactions, 10.0);
        assert_eq!(out[1].measures.transactions, -20.0);
        assert_eq!(out[0].label, TransformLabel::AbsoluteDifference);
    }

    #[test]
    fn test_relative_change_values() {
        let out = TransformKind::RelativeChange.apply(&table(&[100.0, 110.0, 90.0]));
        assert!((out[0].measures.transactions - 0.10).abs() < 1e-12);
        assert!((out[1].measures.transactions - (-20.0 / 110.0)).abs() < 1e-12);
        assert_eq!(out[0].label, TransformLabel::RelativeDifference);
    }

    #[test]
    fn test_lagged_value_is_prior_row_exactly() {
        let rows = table(&[100.0, 110.0, 90.0]);
        let out = TransformKind::LaggedValue.apply(&rows);

        // Row labelled month 2 shows month 1's values, untouched.
        assert_eq!(out[0].measures, rows[0].measures);
        assert_eq!(out[1].measures, rows[1].measures);
        assert_eq!(out[0].label, TransformLabel::LastMonth);
    }

    // ── Cross-transform identities ────────────────────────────────────────────

    #[test]
    fn test_relative_equals_absolute_divided_by_prior() {
        let rows = table(&[80.0, 120.0, 95.0, 140.0]);
        let relative = TransformKind::RelativeChange.apply(&rows);
        let absolute = TransformKind::AbsoluteChange.apply(&rows);
        let lagged = TransformKind::LaggedValue.apply(&rows);

        for i in 0..relative.len() {
            let rel = relative[i].measures.as_array();
            let abs = absolute[i].measures.as_array();
            let prior = lagged[i].measures.as_array();
            for c in 0..rel.len() {
                assert!(
                    (rel[c] - abs[c] / prior[c]).abs() < 1e-12,
                    "row {} col {}",
                    i,
                    c
                );
            }
        }
    }

    // ── Division-by-zero policy ───────────────────────────────────────────────

    #[test]
    fn test_relative_change_zero_prior_is_infinite_not_error() {
        let prior = row(2012, 1, 0.0);
        let mut current = row(2012, 2, 50.0);
        current.measures.ecr = 0.0;
        let out = TransformKind::RelativeChange.apply(&[prior, current]);

        // 50/0 → +inf, 0/0 → NaN; either way no panic and no error.
        assert!(out[0].measures.transactions.is_infinite());
        assert!(out[0].measures.ecr.is_nan());
    }

    #[test]
    fn test_short_input_yields_empty_output() {
        for kind in TransformKind::ALL {
            assert!(kind.apply(&[]).is_empty());
            assert!(kind.apply(&table(&[5.0])).is_empty());
        }
    }

    #[test]
    fn test_two_row_minimum_input() {
        let rows = table(&[7.0, 9.0]);
        for kind in TransformKind::ALL {
            let out = kind.apply(&rows);
            assert_eq!(out.len(), 1);
            assert_eq!(out[0].key, MonthKey::new(2012, 2));
        }
    }
}
