//! Generic bank CSV export parser.
//!
//! Expected columns once the header row is found:
//!   Date,Description,Amount[,Category]
//!
//! Amounts are signed: negative = expense, positive = income/credit. Rows
//! before the header (bank preamble, blank lines) and unparseable rows are
//! skipped. When the Category column is missing or empty, the keyword
//! fallback assigns one from the description.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::path::Path;
use tally_core::{Statement, Transaction, TxnKind};

use crate::categorize::categorize;
use crate::types::{stable_txn_id, statement_id, ParsedStatement};

/// Parse a CSV statement export into a statement candidate plus its batch.
///
/// The statement name is the file name; ids are derived from content so a
/// re-import of the same file reproduces them.
pub fn parse_ledger_csv(path: impl AsRef<Path>) -> Result<ParsedStatement> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let stmt_id = statement_id(&name);
    let statement = Statement::new(&stmt_id, &name, Utc::now())
        .with_size(size)
        .with_kind("text/csv");

    let mut txns = Vec::new();
    let mut header_found = false;
    let mut seen: HashMap<(NaiveDate, String, i64), u32> = HashMap::new();

    for result in rdr.records() {
        let record = result?;
        // Skip bank preamble until the header row
        if !header_found {
            if record.get(0).map(|s| s.trim()) == Some("Date") {
                header_found = true;
            }
            continue;
        }

        let date_str = record.get(0).unwrap_or("").trim();
        if date_str.is_empty() {
            continue;
        }
        let date = match parse_date(date_str) {
            Some(d) => d,
            None => continue, // skip unparseable rows
        };

        let description = record.get(1).unwrap_or("").trim().to_string();

        let amount = match parse_amount(record.get(2).unwrap_or("")) {
            Some(a) => a,
            None => continue,
        };

        let kind = if amount < 0.0 { TxnKind::Expense } else { TxnKind::Income };

        let category = match record.get(3).map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => categorize(&description).to_string(),
        };

        let cents = (amount * 100.0).round() as i64;
        let occurrence = seen
            .entry((date, description.clone(), cents))
            .and_modify(|n| *n += 1)
            .or_insert(0);

        txns.push(Transaction::new(
            stable_txn_id(&name, date, &description, amount, *occurrence),
            date,
            description,
            amount,
            kind,
            category,
            &stmt_id,
        ));
    }

    Ok(ParsedStatement {
        statement,
        transactions: txns,
    })
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .ok()
}

fn parse_amount(s: &str) -> Option<f64> {
    let cleaned = s.trim().replace(['$', ','], "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}
