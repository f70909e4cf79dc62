//! Snapshot storage.
//!
//! The prior board lives in a single file whose extension picks the format:
//! - `.csv`: one row per member, no timestamp
//! - `.json`: the whole snapshot including its timestamp
//! - `.db` / `.sqlite` / `.sqlite3`: sqlite, replaced wholesale on save
//!
//! Unknown extensions fall back to json with a warning.

pub mod csv;
pub mod diff;
pub mod json;
pub mod sqlite;

use std::path::Path;

use tracing::{info, warn};

use crate::error::StoreError;
use crate::snapshot::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Csv,
    Json,
    Sqlite,
}

impl SnapshotFormat {
    pub const FALLBACK: SnapshotFormat = SnapshotFormat::Json;

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(SnapshotFormat::Csv),
            "json" => Some(SnapshotFormat::Json),
            "db" | "sqlite" | "sqlite3" => Some(SnapshotFormat::Sqlite),
            _ => None,
        }
    }

    /// Picks the format for `path`, warning when it has to guess.
    pub fn for_path(path: &Path) -> Self {
        let ext = path.extension().and_then(|e| e.to_str());
        match ext.and_then(Self::from_extension) {
            Some(format) => format,
            None => {
                warn!(
                    "no recognized extension on {}, storing the snapshot as {}",
                    path.display(),
                    Self::FALLBACK.as_str()
                );
                Self::FALLBACK
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotFormat::Csv => "csv",
            SnapshotFormat::Json => "json",
            SnapshotFormat::Sqlite => "sqlite",
        }
    }
}

pub trait SnapshotStore {
    fn path(&self) -> &Path;

    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Snapshot>, StoreError>;

    /// Replaces whatever was stored before.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

pub fn open(path: &Path, format: SnapshotFormat) -> Box<dyn SnapshotStore> {
    let path = path.to_path_buf();
    match format {
        SnapshotFormat::Csv => Box::new(csv::CsvStore::new(path)),
        SnapshotFormat::Json => Box::new(json::JsonStore::new(path)),
        SnapshotFormat::Sqlite => Box::new(sqlite::SqliteStore::new(path)),
    }
}

/// Loads the prior snapshot, or an empty one on the first run.
pub fn load_prior(store: &dyn SnapshotStore) -> Result<Snapshot, StoreError> {
    match store.load()? {
        Some(snapshot) => Ok(snapshot.into_ranked_order()),
        None => {
            info!(
                "no prior snapshot at {}, treating this as the first run",
                store.path().display()
            );
            Ok(Snapshot::empty())
        }
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
    }
    Ok(())
}

/// Reads a whole file, mapping "not found" to `None`.
fn read_if_exists(path: &Path) -> Result<Option<String>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_error(path, e)),
    }
}
