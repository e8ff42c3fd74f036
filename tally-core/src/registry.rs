//! StatementRegistry — bounded, most-recent-first list of uploaded
//! statements with an identity-based admission gate.
//!
//! Identity is two-keyed: a candidate is rejected when any existing entry
//! matches on `id` OR on `name`. Rejection leaves the registry untouched;
//! there is no merge path.

use crate::statement::{Statement, StatementPatch};

/// Registry retention bound. Admitting past this discards the oldest entry.
pub const STATEMENT_CAP: usize = 20;

/// Outcome of offering a statement to the registry.
///
/// Rejections are not errors: the registry is unchanged and the caller can
/// ignore the value to get silent-no-op behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    DuplicateId,
    DuplicateName,
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted)
    }
}

#[derive(Debug, Default, Clone)]
pub struct StatementRegistry {
    // Most-recent-first; index 0 is the latest admission.
    entries: Vec<Statement>,
}

impl StatementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Statement> {
        self.entries.iter().find(|s| s.id == id)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|s| s.name == name)
    }

    /// Most-recent-first view of the registry.
    pub fn entries(&self) -> &[Statement] {
        &self.entries
    }

    /// Offer a candidate. Id collisions win over name collisions when both
    /// apply.
    pub fn add(&mut self, candidate: Statement) -> Admission {
        if self.entries.iter().any(|s| s.id == candidate.id) {
            return Admission::DuplicateId;
        }
        if self.entries.iter().any(|s| s.name == candidate.name) {
            return Admission::DuplicateName;
        }

        self.entries.insert(0, candidate);
        self.entries.truncate(STATEMENT_CAP);
        Admission::Admitted
    }

    /// Rebuild a registry from persisted entries (most-recent-first) without
    /// trusting stored uniqueness: the dedup gate and the retention bound
    /// are re-applied, keeping the first (most recent) entry per id/name.
    pub fn rehydrate(entries: Vec<Statement>) -> Self {
        let mut reg = Self::new();
        for s in entries {
            if reg.entries.len() == STATEMENT_CAP {
                break;
            }
            if reg.entries.iter().any(|e| e.id == s.id || e.name == s.name) {
                continue;
            }
            reg.entries.push(s);
        }
        reg
    }

    /// Merge a partial update into the entry with the given id.
    ///
    /// Returns false when the id is unknown or the entry is terminal and
    /// refused the patch.
    pub fn update(&mut self, id: &str, patch: &StatementPatch) -> bool {
        match self.entries.iter_mut().find(|s| s.id == id) {
            Some(entry) => entry.apply(patch),
            None => false,
        }
    }

    /// Remove the entry with the given id. Returns false when not found.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|s| s.id != id);
        self.entries.len() < before
    }
}
