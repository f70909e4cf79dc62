//! Persisted leaderboard snapshot.
//!
//! A snapshot is the ranked board as published last time, keyed by member
//! identity. Whatever format it is stored in, the prior run's counts may be
//! missing or garbled (hand-edited csv, older files), so count fields load
//! leniently: anything that is not an integer becomes unknown.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::store::diff::RankedEntry;

/// Column name every format uses for the member id.
pub const KEY_COLUMN: &str = "identity";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub identity: u64,
    pub display_name: String,
    pub category: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_delta")]
    pub count_delta: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub taken_at: Option<DateTime<Utc>>,
    pub entries: Vec<SnapshotEntry>,
}

impl Snapshot {
    /// Stand-in for the first run, when nothing was published before.
    pub fn empty() -> Self {
        Snapshot::default()
    }

    pub fn from_ranked(entries: &[RankedEntry], taken_at: DateTime<Utc>) -> Self {
        Snapshot {
            taken_at: Some(taken_at),
            entries: entries
                .iter()
                .map(|e| SnapshotEntry {
                    identity: e.record.identity,
                    display_name: e.record.display_name.clone(),
                    category: e.record.category.clone(),
                    count: Some(e.record.count),
                    count_delta: e.diff.count_delta,
                })
                .collect(),
        }
    }

    /// Restores count-descending order after loading. Entries whose count
    /// is unknown go last; ties keep file order.
    pub fn into_ranked_order(mut self) -> Self {
        self.entries
            .sort_by_key(|e| (e.count.is_none(), std::cmp::Reverse(e.count)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Any scalar a hand-edited or foreign snapshot might hold in a numeric column.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl LooseNumber {
    fn as_i64(&self) -> Option<i64> {
        match self {
            LooseNumber::Int(n) => Some(*n),
            LooseNumber::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            LooseNumber::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = Option::<LooseNumber>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(LooseNumber::as_i64))
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    Ok(lenient_i64(deserializer)?.and_then(|n| u64::try_from(n).ok()))
}

fn lenient_delta<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    lenient_i64(deserializer)
}
