use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

use super::{ensure_parent, SnapshotStore};
use crate::error::StoreError;
use crate::snapshot::{Snapshot, SnapshotEntry};

fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS snapshot (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            taken_at TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS entries (
            position INTEGER NOT NULL,
            identity INTEGER PRIMARY KEY,
            display_name TEXT NOT NULL,
            category TEXT NOT NULL,
            count INTEGER,
            count_delta INTEGER
        )",
        [],
    )?;

    Ok(())
}

/// Single-snapshot sqlite file. Opened per call; a run touches it twice.
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: PathBuf) -> Self {
        SqliteStore { path }
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.path)?;
        init_schema(&conn)?;
        Ok(conn)
    }
}

impl SnapshotStore for SqliteStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        // Connection::open would create the file
        if !self.path.exists() {
            return Ok(None);
        }
        let conn = self.connect()?;

        let taken_at: Option<Option<String>> = conn
            .query_row("SELECT taken_at FROM snapshot WHERE id = 1", [], |row| row.get(0))
            .optional()?;
        let Some(taken_at) = taken_at else {
            return Ok(None);
        };

        let mut stmt = conn.prepare(
            "SELECT identity, display_name, category, count, count_delta
             FROM entries
             ORDER BY position",
        )?;

        let entries = stmt
            .query_map([], |row| {
                Ok(SnapshotEntry {
                    identity: row.get::<_, i64>(0)?.max(0) as u64,
                    display_name: row.get(1)?,
                    category: row.get(2)?,
                    count: lenient_integer(row.get(3)?).and_then(|n| u64::try_from(n).ok()),
                    count_delta: lenient_integer(row.get(4)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Snapshot {
            taken_at: taken_at.and_then(|t| t.parse().ok()),
            entries,
        }))
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        ensure_parent(&self.path)?;
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM entries", [])?;
        tx.execute(
            "INSERT OR REPLACE INTO snapshot (id, taken_at) VALUES (1, ?1)",
            params![snapshot.taken_at.map(|t| t.to_rfc3339())],
        )?;

        let mut stmt = tx.prepare_cached(
            "INSERT OR REPLACE INTO entries (position, identity, display_name, category, count, count_delta)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;

        for (position, entry) in snapshot.entries.iter().enumerate() {
            stmt.execute(params![
                i64::try_from(position).unwrap_or(i64::MAX),
                i64::try_from(entry.identity).unwrap_or(i64::MAX),
                entry.display_name,
                entry.category,
                entry.count.map(|c| i64::try_from(c).unwrap_or(i64::MAX)),
                entry.count_delta,
            ])?;
        }

        drop(stmt);
        tx.commit()?;

        Ok(())
    }
}

/// Integer columns written by other tools may hold reals or text.
fn lenient_integer(value: Value) -> Option<i64> {
    match value {
        Value::Integer(n) => Some(n),
        Value::Real(f) if f.is_finite() && f.fract() == 0.0 => Some(f as i64),
        Value::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}
