//! Statement records: one uploaded source document and its processing
//! lifecycle.
//!
//! Lifecycle: created on upload start (Uploading) → mutated in place while
//! parsing progresses → immutable once terminal (Completed/Error), except
//! for explicit removal from the registry.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Processing state of an uploaded statement.
///
/// Transitions are forward-only (Uploading → Processing → Completed);
/// Error is terminal and reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementStatus {
    #[serde(rename = "uploading")]
    Uploading,
    #[serde(rename = "processing")]
    Processing,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "error")]
    Error,
}

impl StatementStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StatementStatus::Completed | StatementStatus::Error)
    }

    fn rank(&self) -> u8 {
        match self {
            StatementStatus::Uploading => 0,
            StatementStatus::Processing => 1,
            StatementStatus::Completed => 2,
            StatementStatus::Error => 3,
        }
    }
}

/// Summary extracted from a completed statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementSummary {
    pub transaction_count: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub total_income: f64,
    pub total_expenses: f64,
    pub categories: Vec<String>,
}

/// One uploaded source document tracked by the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// Unique identifier assigned at upload time
    pub id: String,
    /// Original filename; secondary identity signal for dedup
    pub name: String,
    /// File size in bytes (descriptive, not load-bearing)
    pub size: u64,
    /// MIME type or format label (descriptive, not load-bearing)
    pub kind: String,
    pub status: StatementStatus,
    /// 0-100, monotonically non-decreasing while status is non-terminal
    pub progress: u8,
    pub uploaded_at: DateTime<Utc>,
    /// Present once status is Completed
    pub summary: Option<StatementSummary>,
}

impl Statement {
    /// Create a statement in the upload-start state.
    pub fn new(id: impl Into<String>, name: impl Into<String>, uploaded_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            size: 0,
            kind: String::new(),
            status: StatementStatus::Uploading,
            progress: 0,
            uploaded_at,
            summary: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_status(mut self, status: StatementStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Merge a partial update, enforcing the lifecycle invariants:
    /// terminal entries refuse all changes, status only moves forward,
    /// progress only increases.
    ///
    /// Returns false when nothing was applied.
    pub fn apply(&mut self, patch: &StatementPatch) -> bool {
        if self.is_terminal() {
            return false;
        }

        let mut changed = false;

        if let Some(status) = patch.status {
            if status.rank() > self.status.rank() {
                self.status = status;
                changed = true;
            }
        }

        if let Some(progress) = patch.progress {
            let progress = progress.min(100);
            if progress > self.progress {
                self.progress = progress;
                changed = true;
            }
        }

        if let Some(summary) = &patch.summary {
            self.summary = Some(summary.clone());
            changed = true;
        }

        changed
    }
}

/// Partial update merged into a registered statement.
///
/// Unset fields are left untouched (shallow merge).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementPatch {
    pub status: Option<StatementStatus>,
    pub progress: Option<u8>,
    pub summary: Option<StatementSummary>,
}

impl StatementPatch {
    pub fn status(status: StatementStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn progress(progress: u8) -> Self {
        Self {
            progress: Some(progress),
            ..Self::default()
        }
    }

    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_summary(mut self, summary: StatementSummary) -> Self {
        self.summary = Some(summary);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stmt(id: &str) -> Statement {
        Statement::new(id, format!("{id}.csv"), Utc::now())
    }

    #[test]
    fn test_status_moves_forward_only() {
        let mut s = stmt("s1");
        assert!(s.apply(&StatementPatch::status(StatementStatus::Processing)));
        assert_eq!(s.status, StatementStatus::Processing);

        // Regression back to Uploading is ignored.
        assert!(!s.apply(&StatementPatch::status(StatementStatus::Uploading)));
        assert_eq!(s.status, StatementStatus::Processing);
    }

    #[test]
    fn test_progress_is_monotone() {
        let mut s = stmt("s1");
        assert!(s.apply(&StatementPatch::progress(40)));
        assert!(!s.apply(&StatementPatch::progress(25)));
        assert_eq!(s.progress, 40);

        // Values above 100 are clamped.
        assert!(s.apply(&StatementPatch::progress(200)));
        assert_eq!(s.progress, 100);
    }

    #[test]
    fn test_terminal_statement_refuses_updates() {
        let mut s = stmt("s1");
        s.apply(&StatementPatch::status(StatementStatus::Error));
        assert!(s.is_terminal());

        assert!(!s.apply(&StatementPatch::progress(90)));
        assert_eq!(s.progress, 0);
    }

    #[test]
    fn test_error_reachable_from_any_non_terminal() {
        let mut s = stmt("s1");
        s.apply(&StatementPatch::status(StatementStatus::Processing));
        assert!(s.apply(&StatementPatch::status(StatementStatus::Error)));
        assert_eq!(s.status, StatementStatus::Error);
    }
}
