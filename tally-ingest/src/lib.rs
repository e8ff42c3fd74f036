//! tally-ingest: statement ingestion (CSV / extracted text) producing
//! structured records for the ledger cache.

pub mod categorize;
pub mod parsers;
pub mod types;

pub use categorize::categorize;
pub use parsers::ledger_csv::parse_ledger_csv;
pub use parsers::plain_text::parse_text_statement;
pub use types::{stable_txn_id, statement_id, ParsedStatement};
