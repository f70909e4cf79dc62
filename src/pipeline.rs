//! One leaderboard run, start to finish.
//!
//! pages → normalize → exclude → rank → compare with prior → render,
//! then persist the new snapshot unless simulating. Any fatal error stops
//! the run before anything is written.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::Config;
use crate::error::{Error, ParseError, Result};
use crate::exclude::ExclusionSet;
use crate::normalize::{self, RawFragment};
use crate::record;
use crate::report::leaderboard;
use crate::snapshot::Snapshot;
use crate::store::{self, diff, diff::RankedEntry};

pub struct RunOutput {
    pub entries: Vec<RankedEntry>,
    pub report: String,
    /// What gets written back for the next run to compare against.
    pub snapshot: Snapshot,
}

/// The pure part of a run: no files, no clock.
pub fn build(
    pages: [&RawFragment; 2],
    exclusions: &ExclusionSet,
    prior: &Snapshot,
    footer: Option<&str>,
    now: DateTime<Utc>,
) -> Result<RunOutput, ParseError> {
    let records = normalize::normalize(pages[0], pages[1])?;
    let scraped = records.len();

    let records = exclusions.filter(records);
    info!(
        members = scraped,
        excluded = scraped - records.len(),
        prior = prior.len(),
        "normalized member list"
    );

    let entries = diff::compare(record::rank(records), prior);
    let report = leaderboard::render(&entries, now, footer);
    let snapshot = Snapshot::from_ranked(&entries, now);

    Ok(RunOutput {
        entries,
        report,
        snapshot,
    })
}

pub fn run(config: &Config, now: DateTime<Utc>) -> Result<RunOutput> {
    let first = RawFragment::read(&config.pages[0])?;
    let second = RawFragment::read(&config.pages[1])?;

    let mut snapshot_store = store::open(&config.snapshot_path, config.format);
    let prior = store::load_prior(snapshot_store.as_ref())?;

    let output = build(
        [&first, &second],
        &config.exclusions,
        &prior,
        config.footer.as_deref(),
        now,
    )?;

    if config.simulate {
        info!("simulating, snapshot not saved");
    } else {
        snapshot_store.save(&output.snapshot)?;
        info!(
            "saved {} entries to {} ({})",
            output.snapshot.len(),
            config.snapshot_path.display(),
            config.format.as_str()
        );
    }

    Ok(output)
}

/// Writes the report where the config says. Posting it to the forum is
/// left to whatever reads the output.
pub fn emit(config: &Config, report: &str) -> Result<()> {
    match &config.output {
        Some(path) => std::fs::write(path, report).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?,
        None => print!("{report}"),
    }

    match config.topic {
        Some(topic) => info!(topic, "report ready for topic"),
        None => info!("report ready (no topic configured)"),
    }
    Ok(())
}
