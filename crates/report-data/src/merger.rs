//! Merge of the monthly aggregate with the external adds-to-cart series.
//!
//! The join key is the month NUMBER, not the full (year, month) key: the
//! adds-to-cart series carries no year column. Aggregate months with no
//! matching cart month are dropped from the output (inner join), which is a
//! latent data-loss risk when the two sources misalign; dropped months are
//! logged at WARN, never raised as errors.

use std::collections::{HashMap, HashSet};

use report_core::models::{CartAdds, MomMeasures, MomRow, MonthlyRow};
use tracing::warn;

/// Inner-join `monthly` with `cart` on month number and derive the purchase
/// rate (quantity / adds-to-cart).
///
/// Input order is preserved, so a key-sorted aggregate yields a key-sorted
/// result. A table spanning two years repeats month numbers and every
/// occurrence joins to the same cart row; this is flagged at WARN.
pub fn merge_with_cart_adds(monthly: &[MonthlyRow], cart: &[CartAdds]) -> Vec<MomRow> {
    let adds_by_month: HashMap<u32, u64> =
        cart.iter().map(|c| (c.month, c.adds_to_cart)).collect();

    let mut seen_months: HashSet<u32> = HashSet::new();
    for row in monthly {
        if !seen_months.insert(row.key.month) {
            warn!(
                "Aggregate repeats month number {} across years; cart join is by month number only",
                row.key.month
            );
        }
    }

    let mut merged: Vec<MomRow> = Vec::with_capacity(monthly.len());
    let mut dropped: Vec<String> = Vec::new();

    for row in monthly {
        let Some(&adds) = adds_by_month.get(&row.key.month) else {
            dropped.push(format!("{}-{:02}", row.key.year, row.key.month));
            continue;
        };

        let adds_to_cart = adds as f64;
        merged.push(MomRow {
            key: row.key,
            measures: MomMeasures {
                transactions: row.transactions as f64,
                quantity: row.quantity as f64,
                sessions: row.sessions as f64,
                ecr: row.ecr,
                items_per_transaction: row.items_per_transaction,
                adds_to_cart,
                purchase_rate: row.quantity as f64 / adds_to_cart,
            },
        });
    }

    if !dropped.is_empty() {
        warn!(
            "Dropped {} aggregate month(s) with no cart-adds match: {}",
            dropped.len(),
            dropped.join(", ")
        );
    }

    merged
}

// ── Tests ─────────────────────────────────────────────────────────────────────
