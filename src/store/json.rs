use std::path::{Path, PathBuf};

use super::{ensure_parent, io_error, read_if_exists, SnapshotStore};
use crate::error::StoreError;
use crate::snapshot::Snapshot;

pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: PathBuf) -> Self {
        JsonStore { path }
    }
}

impl SnapshotStore for JsonStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        match read_if_exists(&self.path)? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        ensure_parent(&self.path)?;
        let text = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, text).map_err(|e| io_error(&self.path, e))
    }
}
