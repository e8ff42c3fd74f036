//! Persistence port for the ledger cache.
//!
//! The cache never talks to storage directly; it goes through `StatePort`
//! so hosts can inject a file-backed port (CLI) or an in-memory one
//! (tests). The persisted shape is `LedgerSnapshot`, a plain serde mirror
//! of the cache contents under a fixed location.

use crate::statement::Statement;
use crate::transaction::Transaction;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

/// Snapshot format marker. Evolution is additive-only; unknown fields in a
/// stored snapshot are ignored on load.
pub const SNAPSHOT_VERSION: u32 = 1;

/// JSON-serializable mirror of the cache contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub statements: Vec<Statement>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Load/save seam between the cache and its backing storage
pub trait StatePort {
    /// Ok(None) when nothing has been persisted yet.
    fn load(&self) -> Result<Option<LedgerSnapshot>>;
    fn save(&self, snapshot: &LedgerSnapshot) -> Result<()>;
}

pub fn tally_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".tally"))
}

pub fn ensure_tally_home() -> Result<PathBuf> {
    let dir = tally_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn default_ledger_path() -> Result<PathBuf> {
    Ok(tally_home()?.join("ledger.json"))
}

/// File-backed port writing pretty JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFilePort {
    path: PathBuf,
}

impl JsonFilePort {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Port at the default location, `~/.tally/ledger.json`.
    pub fn default_location() -> Result<Self> {
        ensure_tally_home()?;
        Ok(Self::at(default_ledger_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatePort for JsonFilePort {
    fn load(&self) -> Result<Option<LedgerSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let s = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        let snapshot: LedgerSnapshot =
            serde_json::from_str(&s).with_context(|| format!("parse {}", self.path.display()))?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, json).with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory port for tests. Stores the serialized JSON so load/save
/// exercise the same round-trip as the file port.
#[derive(Debug, Default)]
pub struct MemoryPort {
    cell: RefCell<Option<String>>,
}

impl MemoryPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Port pre-seeded with raw JSON, as if storage had been edited by hand.
    pub fn seeded(json: impl Into<String>) -> Self {
        Self {
            cell: RefCell::new(Some(json.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.cell.borrow().clone()
    }
}

impl StatePort for MemoryPort {
    fn load(&self) -> Result<Option<LedgerSnapshot>> {
        match self.cell.borrow().as_deref() {
            Some(s) => Ok(Some(serde_json::from_str(s).context("parse stored snapshot")?)),
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        *self.cell.borrow_mut() = Some(json);
        Ok(())
    }
}
