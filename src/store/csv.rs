//! Csv snapshot: header row `identity,display_name,category,count,count_delta`.
//! Unknown counts and deltas are empty cells. No timestamp is kept.

use std::path::{Path, PathBuf};

use super::{ensure_parent, io_error, read_if_exists, SnapshotStore};
use crate::error::StoreError;
use crate::snapshot::{Snapshot, SnapshotEntry};

pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: PathBuf) -> Self {
        CsvStore { path }
    }
}

impl SnapshotStore for CsvStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let Some(text) = read_if_exists(&self.path)? else {
            return Ok(None);
        };

        let mut reader = ::csv::ReaderBuilder::new()
            .trim(::csv::Trim::All)
            .from_reader(text.as_bytes());

        let entries = reader
            .deserialize::<SnapshotEntry>()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Snapshot {
            taken_at: None,
            entries,
        }))
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        ensure_parent(&self.path)?;
        let file = std::fs::File::create(&self.path).map_err(|e| io_error(&self.path, e))?;
        let mut writer = ::csv::Writer::from_writer(file);

        if snapshot.entries.is_empty() {
            writer.write_record(["identity", "display_name", "category", "count", "count_delta"])?;
        }
        for entry in &snapshot.entries {
            writer.serialize(entry)?;
        }

        writer.flush().map_err(|e| io_error(&self.path, e))
    }
}
