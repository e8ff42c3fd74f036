//! Aggregation queries over the transaction list.
//!
//! Pure functions recomputed from scratch on every call; nothing here is
//! memoized. Client-side volumes are hundreds to low thousands of records,
//! so recomputation stays cheap and correctness stays trivial.

use crate::transaction::{Transaction, TxnKind};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Display default for recency views.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Sum of raw amounts over income transactions.
pub fn total_income(txns: &[Transaction]) -> f64 {
    txns.iter()
        .filter(|t| t.kind == TxnKind::Income)
        .map(|t| t.amount)
        .sum()
}

/// Sum of absolute amounts over expense transactions.
pub fn total_expenses(txns: &[Transaction]) -> f64 {
    txns.iter()
        .filter(|t| t.kind == TxnKind::Expense)
        .map(|t| t.amount.abs())
        .sum()
}

pub fn net_balance(txns: &[Transaction]) -> f64 {
    total_income(txns) - total_expenses(txns)
}

/// Group transactions by category, each bucket in insertion order.
///
/// Buckets are created implicitly: the first transaction carrying a
/// category establishes it.
pub fn by_category(txns: &[Transaction]) -> HashMap<String, Vec<Transaction>> {
    let mut buckets: HashMap<String, Vec<Transaction>> = HashMap::new();
    for t in txns {
        buckets.entry(t.category.clone()).or_default().push(t.clone());
    }
    buckets
}

/// Per-category summed magnitude (normalized amount), for breakdown views.
pub fn category_totals(txns: &[Transaction]) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for t in txns {
        *totals.entry(t.category.clone()).or_insert(0.0) += t.normalized_amount();
    }
    totals
}

/// The `limit` transactions with the most recent date, descending.
///
/// Date ties keep the store's insertion order: the sort key is the date
/// alone and the sort is stable.
pub fn recent(txns: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = txns.to_vec();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out.truncate(limit);
    out
}

/// Earliest and latest transaction date, or None on an empty list.
pub fn date_range(txns: &[Transaction]) -> Option<(NaiveDate, NaiveDate)> {
    let first = txns.iter().map(|t| t.date).min()?;
    let last = txns.iter().map(|t| t.date).max()?;
    Some((first, last))
}

/// The subset contributed by one statement, insertion order.
pub fn for_source(txns: &[Transaction], statement_id: &str) -> Vec<Transaction> {
    txns.iter()
        .filter(|t| t.source == statement_id)
        .cloned()
        .collect()
}
