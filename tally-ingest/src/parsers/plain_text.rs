//! Column-aligned text statement parser (the PDF-to-text shape).
//!
//! Expected section:
//!   TRANSACTION DETAIL
//!   DATE        DESCRIPTION                         AMOUNT
//!   03/02       ACME CORP PAYROLL                 2,400.00
//!   03/05       H-E-B GROCERIES                     -86.40

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use regex::Regex;
use std::collections::HashMap;
use tally_core::{Statement, Transaction, TxnKind};

use crate::categorize::categorize;
use crate::types::{stable_txn_id, statement_id, ParsedStatement};

fn parse_mm_dd_with_year(s: &str, year: i32) -> Option<NaiveDate> {
    let s = s.trim();
    let mut it = s.split('/');
    let m: u32 = it.next()?.parse().ok()?;
    let d: u32 = it.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, m, d)
}

/// Parse extracted statement text into a statement candidate plus its batch.
///
/// `statement_year` is required because rows carry MM/DD only. Lines before
/// the TRANSACTION DETAIL header and non-matching lines are skipped.
pub fn parse_text_statement(text: &str, name: &str, statement_year: i32) -> Result<ParsedStatement> {
    let header_re = Regex::new(r"TRANSACTION\s+DETAIL")?;
    let txn_re = Regex::new(concat!(
        r"^\s*(?P<date>\d{2}/\d{2})\s+",
        r"(?P<desc>.+?)\s+",
        r"(?P<amount>-?[\d,]+\.\d{2})\s*$"
    ))?;

    let stmt_id = statement_id(name);
    let statement = Statement::new(&stmt_id, name, Utc::now())
        .with_size(text.len() as u64)
        .with_kind("text/plain");

    let mut in_section = false;
    let mut txns = Vec::new();
    let mut seen: HashMap<(NaiveDate, String, i64), u32> = HashMap::new();

    for line in text.lines() {
        if !in_section {
            if header_re.is_match(line) {
                in_section = true;
            }
            continue;
        }

        if let Some(caps) = txn_re.captures(line) {
            let date = match parse_mm_dd_with_year(&caps["date"], statement_year) {
                Some(d) => d,
                None => continue,
            };

            let description = caps["desc"].trim().to_string();
            let amount: f64 = match caps["amount"].replace(",", "").parse() {
                Ok(a) => a,
                Err(_) => continue,
            };

            let kind = if amount < 0.0 { TxnKind::Expense } else { TxnKind::Income };
            let category = categorize(&description).to_string();

            let cents = (amount * 100.0).round() as i64;
            let occurrence = seen
                .entry((date, description.clone(), cents))
                .and_modify(|n| *n += 1)
                .or_insert(0);

            txns.push(Transaction::new(
                stable_txn_id(name, date, &description, amount, *occurrence),
                date,
                description,
                amount,
                kind,
                category,
                &stmt_id,
            ));
        }
    }

    Ok(ParsedStatement {
        statement,
        transactions: txns,
    })
}
