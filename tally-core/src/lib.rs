//! tally-core: the client-side financial ledger cache
//!
//! A persisted, incrementally-updated collection of uploaded statements and
//! parsed transactions with identity-based deduplication and on-demand
//! aggregation queries. Upload/parse pipelines and UI layers live outside
//! this crate and only exchange plain records with it.

pub mod aggregate;
pub mod cache;
pub mod persist;
pub mod registry;
pub mod statement;
pub mod store;
pub mod transaction;

pub use aggregate::DEFAULT_RECENT_LIMIT;
pub use cache::LedgerCache;
pub use persist::{
    default_ledger_path, ensure_tally_home, tally_home, JsonFilePort, LedgerSnapshot, MemoryPort,
    StatePort, SNAPSHOT_VERSION,
};
pub use registry::{Admission, StatementRegistry, STATEMENT_CAP};
pub use statement::{Statement, StatementPatch, StatementStatus, StatementSummary};
pub use store::TransactionStore;
pub use transaction::{Transaction, TxnKind};
