//! Exclusion list: member ids that never appear on the board.

use std::collections::HashSet;
use std::path::Path;

use tracing::warn;

use crate::record::EntityRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    ids: HashSet<u64>,
}

impl ExclusionSet {
    /// One id per line. Blank and non-integer lines are skipped.
    pub fn parse(text: &str) -> Self {
        let ids = text
            .lines()
            .filter_map(|line| line.trim().parse::<u64>().ok())
            .collect();
        ExclusionSet { ids }
    }

    /// A missing or unreadable file means nobody is excluded.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) => {
                warn!("exclusion list {} not read ({e}), excluding nobody", path.display());
                Self::default()
            }
        }
    }

    pub fn contains(&self, identity: u64) -> bool {
        self.ids.contains(&identity)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Keeps order of the remaining records.
    pub fn filter(&self, records: Vec<EntityRecord>) -> Vec<EntityRecord> {
        if self.is_empty() {
            return records;
        }
        records
            .into_iter()
            .filter(|r| !self.contains(r.identity))
            .collect()
    }
}

impl FromIterator<u64> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        ExclusionSet {
            ids: iter.into_iter().collect(),
        }
    }
}
