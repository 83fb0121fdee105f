//! JSON file persistence for the [`Ledger`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::Catalog;
use crate::error::{EngineError, EngineResult};
use crate::models::DATE_FORMAT;

use super::state::Ledger;

/// File name prefix of exported backups (`shiftcash_backup_YYYY-MM-DD.json`).
pub const BACKUP_FILE_PREFIX: &str = "shiftcash_backup_";

/// Reads and writes the ledger as a pretty-printed JSON document.
///
/// Writes go to a sibling `.tmp` file first and are renamed over the target,
/// so a crash never leaves a half-written state file behind.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Creates a store for the state file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the state file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved ledger.
    ///
    /// A missing file yields a fresh ledger over `default_catalog`.
    ///
    /// # Errors
    ///
    /// `StateIo` if the file exists but cannot be read, `StateParseError` if
    /// it does not contain a valid ledger.
    pub fn load(&self, default_catalog: &Catalog) -> EngineResult<Ledger> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No saved state, starting fresh");
                return Ok(Ledger::new(default_catalog.clone()));
            }
            Err(source) => return Err(self.io_error(source)),
        };

        let ledger: Ledger =
            serde_json::from_str(&content).map_err(|e| EngineError::StateParseError {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;
        info!(
            path = %self.path.display(),
            shifts = ledger.shifts().len(),
            "Loaded saved state"
        );
        Ok(ledger)
    }

    /// Loads the saved ledger, falling back to a fresh one on any error.
    pub fn load_or_default(&self, default_catalog: &Catalog) -> Ledger {
        self.load(default_catalog).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load saved state, starting fresh");
            Ledger::new(default_catalog.clone())
        })
    }

    /// Writes the ledger to the state file.
    ///
    /// The document is serialized up front and written with `tokio::fs`, so
    /// callers may hold the ledger lock across the await to keep writes in
    /// edit order.
    pub async fn save(&self, ledger: &Ledger) -> EngineResult<()> {
        let json = serde_json::to_vec_pretty(ledger)
            .map_err(|e| self.io_error(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        atomic_write(&self.path, &json)
            .await
            .map_err(|source| self.io_error(source))
    }

    /// File name of a backup taken on `today` (`shiftcash_backup_YYYY-MM-DD.json`).
    pub fn backup_file_name(today: NaiveDate) -> String {
        format!("{}{}.json", BACKUP_FILE_PREFIX, today.format(DATE_FORMAT))
    }

    fn io_error(&self, source: io::Error) -> EngineError {
        EngineError::StateIo {
            path: self.path.display().to_string(),
            source,
        }
    }
}

/// Atomically write `bytes` to `path` (via `.tmp` + rename).
async fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, bytes).await?;
    tokio::fs::rename(&tmp_path, path).await
}
