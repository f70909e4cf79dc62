//! Snapshot comparison engine.
//!
//! Compares the freshly ranked board against the prior snapshot:
//! - Matches entries by member identity (names change, ids never do)
//! - Per member: count delta and rank delta, each unknown when the
//!   prior snapshot has nothing usable for that member
//! - Members that dropped off the board are not reported

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::record::EntityRecord;
use crate::snapshot::Snapshot;

/// Movement of one member since the prior snapshot. `None` means unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffResult {
    pub count_delta: Option<i64>,
    /// Positive means the member moved up, toward rank 1.
    pub rank_delta: Option<i64>,
}

/// One row of the new board, ranked and compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    /// 1-based.
    pub rank: usize,
    pub record: EntityRecord,
    pub diff: DiffResult,
}

struct PriorEntry {
    rank: Option<usize>,
    count: Option<u64>,
}

/// Build a lookup of prior rank and count by identity. Rank is the 1-based
/// position in the prior board; entries with an unknown count have no rank.
/// A repeated identity keeps its first, highest placed entry and the repeat
/// takes no rank.
fn index_prior(prior: &Snapshot) -> HashMap<u64, PriorEntry> {
    let mut map = HashMap::with_capacity(prior.len());
    let mut rank = 0;
    for entry in &prior.entries {
        if map.contains_key(&entry.identity) {
            debug!(identity = entry.identity, "repeated identity in prior snapshot ignored");
            continue;
        }
        let entry_rank = entry.count.map(|_| {
            rank += 1;
            rank
        });
        map.insert(
            entry.identity,
            PriorEntry {
                rank: entry_rank,
                count: entry.count,
            },
        );
    }
    map
}

fn rank_to_i64(rank: usize) -> Option<i64> {
    i64::try_from(rank).ok()
}

/// `ranked` must already be in rank order (see [`crate::record::rank`]).
/// `prior` must be in ranked order too, which is what
/// [`Snapshot::into_ranked_order`] gives after a load.
pub fn compare(ranked: Vec<EntityRecord>, prior: &Snapshot) -> Vec<RankedEntry> {
    let lookup = index_prior(prior);
    let mut degraded = 0usize;

    let entries: Vec<RankedEntry> = ranked
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let rank = i + 1;
            let diff = match lookup.get(&record.identity) {
                Some(prior_entry) => {
                    let count_delta = prior_entry.count.and_then(|before| {
                        let now = i64::try_from(record.count).ok()?;
                        now.checked_sub(i64::try_from(before).ok()?)
                    });
                    let rank_delta = prior_entry.rank.and_then(|before| {
                        rank_to_i64(before)?.checked_sub(rank_to_i64(rank)?)
                    });
                    if count_delta.is_none() || rank_delta.is_none() {
                        degraded += 1;
                        debug!(identity = record.identity, "prior entry unusable, delta unknown");
                    }
                    DiffResult {
                        count_delta,
                        rank_delta,
                    }
                }
                None => DiffResult::default(),
            };

            RankedEntry { rank, record, diff }
        })
        .collect();

    let new_members = entries
        .iter()
        .filter(|e| !lookup.contains_key(&e.record.identity))
        .count();
    let present: HashSet<u64> = entries.iter().map(|e| e.record.identity).collect();
    let departed = lookup.keys().filter(|id| !present.contains(id)).count();

    debug!(
        new_members,
        departed,
        degraded,
        "compared against prior snapshot of {} entries",
        prior.len()
    );

    entries
}
