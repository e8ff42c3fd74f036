//! Transaction record types for the ledger cache

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Income/expense axis of a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TxnKind {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

/// One financial event extracted from a statement.
///
/// `amount` is stored exactly as the parser authored it. Aggregation
/// normalizes by `kind` (abs for expenses, raw for income), never by the
/// stored sign.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Unique identifier, stable across re-imports of the same source data
    pub id: String,
    /// Date of the transaction (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Human-readable description
    pub description: String,
    /// Signed or unsigned depending on the upstream parser
    pub amount: f64,
    pub kind: TxnKind,
    /// Free-text label assigned by the parsing collaborator
    pub category: String,
    /// Id of the originating statement
    pub source: String,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        kind: TxnKind,
        category: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            description: description.into(),
            amount,
            kind,
            category: category.into(),
            source: source.into(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TxnKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TxnKind::Expense
    }

    /// Magnitude used for expense totals
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }

    /// Contribution of this transaction to an income/expense total:
    /// raw amount for income, absolute value for expenses.
    pub fn normalized_amount(&self) -> f64 {
        match self.kind {
            TxnKind::Income => self.amount,
            TxnKind::Expense => self.amount.abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_kind_predicates() {
        let t = Transaction::new(
            "tx-1",
            date(2026, 3, 2),
            "Payroll deposit",
            2400.0,
            TxnKind::Income,
            "salary",
            "stmt-1",
        );
        assert!(t.is_income());
        assert!(!t.is_expense());
        assert_eq!(t.normalized_amount(), 2400.0);
    }

    #[test]
    fn test_expense_normalizes_to_abs() {
        let t = Transaction::new(
            "tx-2",
            date(2026, 3, 3),
            "Groceries",
            -53.20,
            TxnKind::Expense,
            "food",
            "stmt-1",
        );
        assert_eq!(t.abs_amount(), 53.20);
        assert_eq!(t.normalized_amount(), 53.20);
    }

    #[test]
    fn test_negative_income_passes_through() {
        // Stored as authored; not corrected at admission or normalization.
        let t = Transaction::new(
            "tx-3",
            date(2026, 3, 4),
            "Refund reversal",
            -20.0,
            TxnKind::Income,
            "other",
            "stmt-1",
        );
        assert_eq!(t.normalized_amount(), -20.0);
    }

    #[test]
    fn test_serde_kind_renames() {
        let t = Transaction::new(
            "tx-4",
            date(2026, 3, 5),
            "Coffee",
            4.75,
            TxnKind::Expense,
            "food",
            "stmt-1",
        );
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"kind\":\"expense\""));
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
