//! Hand-off types and identity derivation for statement ingestion.
//!
//! Parsers emit a `ParsedStatement`: the statement record plus its
//! transaction batch, ready for admission into the ledger cache. Both ids
//! are derived deterministically from content so that re-importing the same
//! export reproduces the same ids and the cache's dedup gates absorb it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_core::{Statement, Transaction};

/// Structured output of a statement parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedStatement {
    pub statement: Statement,
    pub transactions: Vec<Transaction>,
}

/// Lowercased alphanumeric slug of a label, for embedding in ids.
pub fn slug(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_dash = true;
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Statement id derived from the source filename.
pub fn statement_id(name: &str) -> String {
    format!("stmt-{}", slug(name))
}

/// Deterministic transaction id.
///
/// Built from the source name, date, description, amount in cents, and an
/// occurrence counter that disambiguates identical rows within one export.
/// Same export in, same ids out.
pub fn stable_txn_id(
    source_name: &str,
    date: NaiveDate,
    description: &str,
    amount: f64,
    occurrence: u32,
) -> String {
    let cents = (amount * 100.0).round() as i64;
    let mut desc = slug(description);
    desc.truncate(32);
    format!("{}:{}:{}:{}:{}", slug(source_name), date, desc, cents, occurrence)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_slug_strips_punctuation() {
        assert_eq!(slug("March 2026 (Chase).csv"), "march-2026-chase-csv");
        assert_eq!(slug("  weird___name  "), "weird-name");
    }

    #[test]
    fn test_stable_ids_are_reproducible() {
        let a = stable_txn_id("march.csv", date(2026, 3, 5), "H-E-B #455", -14.05, 0);
        let b = stable_txn_id("march.csv", date(2026, 3, 5), "H-E-B #455", -14.05, 0);
        assert_eq!(a, b);
        assert_eq!(a, "march-csv:2026-03-05:h-e-b-455:-1405:0");
    }

    #[test]
    fn test_occurrence_disambiguates_identical_rows() {
        let a = stable_txn_id("m.csv", date(2026, 3, 5), "Coffee", -4.75, 0);
        let b = stable_txn_id("m.csv", date(2026, 3, 5), "Coffee", -4.75, 1);
        assert_ne!(a, b);
    }
}
