//! LedgerCache — the statement registry and transaction store behind one
//! type, with an injected persistence port.
//!
//! Hosts construct the cache explicitly (no process-wide singleton) and
//! choose the port: file-backed in the CLI, in-memory in tests. All
//! in-memory mutations are total; anyhow errors appear only at the port
//! boundary.

use crate::aggregate;
use crate::persist::{LedgerSnapshot, StatePort, SNAPSHOT_VERSION};
use crate::registry::{Admission, StatementRegistry};
use crate::statement::{Statement, StatementPatch, StatementStatus, StatementSummary};
use crate::store::TransactionStore;
use crate::transaction::Transaction;
use anyhow::Result;
use chrono::NaiveDate;
use std::collections::HashMap;

pub struct LedgerCache {
    registry: StatementRegistry,
    store: TransactionStore,
    port: Option<Box<dyn StatePort>>,
}

impl Default for LedgerCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerCache {
    /// Empty cache with no backing storage.
    pub fn new() -> Self {
        Self {
            registry: StatementRegistry::new(),
            store: TransactionStore::new(),
            port: None,
        }
    }

    /// Rehydrate from a port, re-applying both dedup gates to the loaded
    /// data rather than trusting stored uniqueness.
    pub fn open<P: StatePort + 'static>(port: P) -> Result<Self> {
        let snapshot = port.load()?.unwrap_or_default();

        let registry = StatementRegistry::rehydrate(snapshot.statements);
        let mut store = TransactionStore::new();
        store.add_batch(snapshot.transactions);

        Ok(Self {
            registry,
            store,
            port: Some(Box::new(port)),
        })
    }

    /// Persist the current contents through the port; no-op without one.
    pub fn save(&self) -> Result<()> {
        if let Some(port) = &self.port {
            port.save(&self.snapshot())?;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            version: SNAPSHOT_VERSION,
            statements: self.registry.entries().to_vec(),
            transactions: self.store.transactions().to_vec(),
        }
    }

    // --- statement registry ---

    pub fn add_statement(&mut self, candidate: Statement) -> Admission {
        self.registry.add(candidate)
    }

    pub fn update_statement(&mut self, id: &str, patch: &StatementPatch) -> bool {
        self.registry.update(id, patch)
    }

    pub fn remove_statement(&mut self, id: &str) -> bool {
        self.registry.remove(id)
    }

    pub fn statement(&self, id: &str) -> Option<&Statement> {
        self.registry.get(id)
    }

    /// Most-recent-first statement list.
    pub fn statements(&self) -> &[Statement] {
        self.registry.entries()
    }

    // --- transaction store ---

    pub fn add_transactions(&mut self, batch: Vec<Transaction>) -> usize {
        self.store.add_batch(batch)
    }

    pub fn clear_transactions(&mut self) {
        self.store.clear();
    }

    /// Insertion-ordered transaction list.
    pub fn transactions(&self) -> &[Transaction] {
        self.store.transactions()
    }

    /// Parse-completion path: admit the statement's batch, derive its
    /// summary from everything the store holds for that source, and mark it
    /// Completed at full progress.
    ///
    /// No-op (returns 0) when the statement id is unknown or terminal, so a
    /// stale completion callback cannot resurrect a removed statement.
    pub fn complete_statement(&mut self, id: &str, batch: Vec<Transaction>) -> usize {
        let eligible = self
            .registry
            .get(id)
            .map(|s| !s.is_terminal())
            .unwrap_or(false);
        if !eligible {
            return 0;
        }

        let admitted = self.store.add_batch(batch);

        let contributed = aggregate::for_source(self.store.transactions(), id);
        let summary = summarize(&contributed);

        let patch = StatementPatch::status(StatementStatus::Completed)
            .with_progress(100)
            .with_summary(summary);
        self.registry.update(id, &patch);

        admitted
    }

    // --- aggregation queries ---

    pub fn total_income(&self) -> f64 {
        aggregate::total_income(self.store.transactions())
    }

    pub fn total_expenses(&self) -> f64 {
        aggregate::total_expenses(self.store.transactions())
    }

    pub fn net_balance(&self) -> f64 {
        aggregate::net_balance(self.store.transactions())
    }

    pub fn transactions_by_category(&self) -> HashMap<String, Vec<Transaction>> {
        aggregate::by_category(self.store.transactions())
    }

    pub fn category_totals(&self) -> HashMap<String, f64> {
        aggregate::category_totals(self.store.transactions())
    }

    pub fn recent_transactions(&self, limit: usize) -> Vec<Transaction> {
        aggregate::recent(self.store.transactions(), limit)
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        aggregate::date_range(self.store.transactions())
    }

    pub fn transactions_for(&self, statement_id: &str) -> Vec<Transaction> {
        aggregate::for_source(self.store.transactions(), statement_id)
    }
}

fn summarize(txns: &[Transaction]) -> StatementSummary {
    let range = aggregate::date_range(txns);

    let mut categories: Vec<String> = Vec::new();
    for t in txns {
        if !categories.contains(&t.category) {
            categories.push(t.category.clone());
        }
    }

    StatementSummary {
        transaction_count: txns.len(),
        first_date: range.map(|(first, _)| first),
        last_date: range.map(|(_, last)| last),
        total_income: aggregate::total_income(txns),
        total_expenses: aggregate::total_expenses(txns),
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryPort;
    use crate::transaction::TxnKind;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stmt(id: &str, name: &str) -> Statement {
        Statement::new(id, name, Utc::now())
    }

    fn txn(id: &str, d: NaiveDate, amount: f64, kind: TxnKind, source: &str) -> Transaction {
        Transaction::new(id, d, format!("txn {id}"), amount, kind, "misc", source)
    }

    #[test]
    fn test_complete_statement_populates_summary() {
        let mut cache = LedgerCache::new();
        cache.add_statement(stmt("s1", "bank.csv"));

        let admitted = cache.complete_statement(
            "s1",
            vec![
                txn("t1", date(2026, 1, 5), 1200.0, TxnKind::Income, "s1"),
                txn("t2", date(2026, 1, 9), -80.0, TxnKind::Expense, "s1"),
            ],
        );
        assert_eq!(admitted, 2);

        let s = cache.statement("s1").unwrap();
        assert_eq!(s.status, StatementStatus::Completed);
        assert_eq!(s.progress, 100);

        let summary = s.summary.as_ref().unwrap();
        assert_eq!(summary.transaction_count, 2);
        assert_eq!(summary.first_date, Some(date(2026, 1, 5)));
        assert_eq!(summary.last_date, Some(date(2026, 1, 9)));
        assert_eq!(summary.total_income, 1200.0);
        assert_eq!(summary.total_expenses, 80.0);
        assert_eq!(summary.categories, ["misc"]);
    }

    #[test]
    fn test_complete_unknown_statement_is_noop() {
        let mut cache = LedgerCache::new();
        let admitted =
            cache.complete_statement("ghost", vec![txn("t1", date(2026, 1, 5), -5.0, TxnKind::Expense, "ghost")]);
        assert_eq!(admitted, 0);
        assert!(cache.transactions().is_empty());
    }

    #[test]
    fn test_complete_terminal_statement_is_noop() {
        let mut cache = LedgerCache::new();
        cache.add_statement(stmt("s1", "bank.csv"));
        cache.update_statement("s1", &StatementPatch::status(StatementStatus::Error));

        let admitted =
            cache.complete_statement("s1", vec![txn("t1", date(2026, 1, 5), -5.0, TxnKind::Expense, "s1")]);
        assert_eq!(admitted, 0);
        assert!(cache.transactions().is_empty());
        assert_eq!(cache.statement("s1").unwrap().status, StatementStatus::Error);
    }

    #[test]
    fn test_save_and_open_round_trip() {
        let port = MemoryPort::new();
        {
            let mut cache = LedgerCache::new();
            cache.add_statement(stmt("s1", "bank.csv"));
            cache.add_transactions(vec![
                txn("t1", date(2026, 1, 5), 100.0, TxnKind::Income, "s1"),
                txn("t2", date(2026, 1, 6), -25.0, TxnKind::Expense, "s1"),
            ]);
            port.save(&cache.snapshot()).unwrap();
        }

        let cache = LedgerCache::open(port).unwrap();
        assert_eq!(cache.statements().len(), 1);
        assert_eq!(cache.transactions().len(), 2);
        assert_eq!(cache.total_income(), 100.0);
        assert_eq!(cache.total_expenses(), 25.0);

        // Re-importing ids already persisted is absorbed by the gate.
        let mut cache = cache;
        assert_eq!(
            cache.add_transactions(vec![txn("t2", date(2026, 1, 6), -25.0, TxnKind::Expense, "s1")]),
            0
        );
    }

    #[test]
    fn test_open_rededuplicates_edited_snapshot() {
        // Duplicate transaction id and duplicate statement name, as if the
        // stored JSON had been edited by hand.
        let port = MemoryPort::seeded(
            r#"{
                "version": 1,
                "statements": [
                    {"id": "s1", "name": "bank.csv", "size": 0, "kind": "",
                     "status": "completed", "progress": 100,
                     "uploaded_at": "2026-01-10T00:00:00Z", "summary": null},
                    {"id": "s2", "name": "bank.csv", "size": 0, "kind": "",
                     "status": "completed", "progress": 100,
                     "uploaded_at": "2026-01-09T00:00:00Z", "summary": null}
                ],
                "transactions": [
                    {"id": "t1", "date": "2026-01-05", "description": "a",
                     "amount": -10.0, "kind": "expense", "category": "misc", "source": "s1"},
                    {"id": "t1", "date": "2026-01-05", "description": "a again",
                     "amount": -10.0, "kind": "expense", "category": "misc", "source": "s1"}
                ]
            }"#,
        );

        let cache = LedgerCache::open(port).unwrap();
        assert_eq!(cache.statements().len(), 1);
        assert_eq!(cache.statements()[0].id, "s1");
        assert_eq!(cache.transactions().len(), 1);
        assert_eq!(cache.transactions()[0].description, "a");
    }

    #[test]
    fn test_save_without_port_is_noop() {
        let cache = LedgerCache::new();
        cache.save().unwrap();
    }
}
