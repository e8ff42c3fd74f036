//! TransactionStore — insertion-ordered transaction list with an id-based
//! dedup gate on batch admission.
//!
//! The list order is admission order, not chronological; recency views are
//! produced by explicit sort in the aggregation queries. A HashSet index
//! keeps batch filtering linear in the batch size.

use crate::transaction::Transaction;
use std::collections::HashSet;

#[derive(Debug, Default, Clone)]
pub struct TransactionStore {
    txns: Vec<Transaction>,
    ids: HashSet<String>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.txns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.txns.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Insertion-ordered view of all transactions.
    pub fn transactions(&self) -> &[Transaction] {
        &self.txns
    }

    /// Offer a batch. Transactions whose id is already present (or repeated
    /// within the batch) are silently discarded; the rest are appended in
    /// offered order. Returns the number admitted.
    pub fn add_batch(&mut self, batch: Vec<Transaction>) -> usize {
        let mut admitted = 0;
        for txn in batch {
            if !self.ids.insert(txn.id.clone()) {
                continue;
            }
            self.txns.push(txn);
            admitted += 1;
        }
        admitted
    }

    /// Empty the store unconditionally.
    pub fn clear(&mut self) {
        self.txns.clear();
        self.ids.clear();
    }
}
