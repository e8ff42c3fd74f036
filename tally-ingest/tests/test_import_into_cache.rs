use std::io::Write;

use tally_core::{Admission, LedgerCache, StatementStatus};
use tally_ingest::{parse_ledger_csv, parse_text_statement};

const CSV: &str = "Acme Bank export\n\
                   Date,Description,Amount,Category\n\
                   2026-03-02,ACME CORP PAYROLL,2400.00,salary\n\
                   2026-03-05,RENT MARCH,-950.00,housing\n\
                   2026-03-05,H-E-B GROCERIES,-86.40,\n\
                   2026-03-09,CITY COFFEE,-4.75,\n";

fn write_csv() -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    f.write_all(CSV.as_bytes()).unwrap();
    f
}

/// End-to-end import: parse → admit → complete → aggregate.
#[test]
fn test_csv_import_populates_cache() {
    let f = write_csv();
    let parsed = parse_ledger_csv(f.path()).unwrap();

    let mut cache = LedgerCache::new();
    assert_eq!(cache.add_statement(parsed.statement.clone()), Admission::Admitted);

    let admitted = cache.complete_statement(&parsed.statement.id, parsed.transactions);
    assert_eq!(admitted, 4);

    let s = cache.statement(&parsed.statement.id).unwrap();
    assert_eq!(s.status, StatementStatus::Completed);
    assert_eq!(s.summary.as_ref().unwrap().transaction_count, 4);

    assert_eq!(cache.total_income(), 2400.0);
    assert!((cache.total_expenses() - 1041.15).abs() < 1e-9);
    assert_eq!(cache.transactions_by_category()["food"].len(), 2);
}

/// Importing the same file twice changes nothing: the statement is rejected
/// by id and every transaction id is already present.
#[test]
fn test_double_import_is_absorbed() {
    let f = write_csv();

    let mut cache = LedgerCache::new();
    let first = parse_ledger_csv(f.path()).unwrap();
    cache.add_statement(first.statement.clone());
    cache.complete_statement(&first.statement.id, first.transactions);

    let second = parse_ledger_csv(f.path()).unwrap();
    assert_eq!(cache.add_statement(second.statement), Admission::DuplicateId);
    assert_eq!(cache.add_transactions(second.transactions), 0);

    assert_eq!(cache.statements().len(), 1);
    assert_eq!(cache.transactions().len(), 4);
}

/// Text and CSV parses of the same activity produce the same shape.
#[test]
fn test_text_import_matches_csv_semantics() {
    let text = "TRANSACTION DETAIL\n\
                DATE   DESCRIPTION            AMOUNT\n\
                03/02  ACME CORP PAYROLL    2,400.00\n\
                03/05  RENT MARCH            -950.00\n";

    let parsed = parse_text_statement(text, "march.txt", 2026).unwrap();

    let mut cache = LedgerCache::new();
    cache.add_statement(parsed.statement.clone());
    cache.complete_statement(&parsed.statement.id, parsed.transactions);

    assert_eq!(cache.total_income(), 2400.0);
    assert_eq!(cache.total_expenses(), 950.0);
    assert_eq!(cache.transactions_by_category()["housing"].len(), 1);
}
