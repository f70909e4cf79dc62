//! Record normalizer.
//!
//! Turns the two raw member-list pages into one identity-indexed record
//! list. The identity is not a column of its own: it is embedded in the
//! status link (`...;u=123`), so a row without that token means the page
//! layout changed and the whole run must stop.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, ParseError};
use crate::record::EntityRecord;

pub const NAME_COLUMN: &str = "Name";
pub const LINK_COLUMN: &str = "Status";
pub const CATEGORY_COLUMN: &str = "Position";
pub const COUNT_COLUMN: &str = "Posts";

/// One page of the member list as a header row plus string cells.
#[derive(Debug, Clone)]
pub struct RawFragment {
    /// Where this page came from; only used in error messages.
    pub source: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawFragment {
    pub fn new(source: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        RawFragment {
            source: source.into(),
            headers,
            rows,
        }
    }

    /// Reads a delimited page file. `.tsv` files are tab separated,
    /// everything else is treated as csv.
    pub fn read(path: &Path) -> Result<Self, Error> {
        let delimiter = match path.extension().and_then(|e| e.to_str()) {
            Some("tsv") => b'\t',
            _ => b',',
        };
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(path.display().to_string(), file, delimiter)?)
    }

    pub fn from_reader<R: Read>(source: String, reader: R, delimiter: u8) -> Result<Self, ParseError> {
        let malformed = |e: csv::Error| ParseError::Malformed {
            fragment: source.clone(),
            source: e,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(malformed)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(malformed)?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(RawFragment {
            source,
            headers,
            rows,
        })
    }

    fn column(&self, name: &'static str) -> Result<usize, ParseError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ParseError::MissingColumn {
                fragment: self.source.clone(),
                column: name,
            })
    }

    fn records(&self) -> Result<Vec<EntityRecord>, ParseError> {
        let name_col = self.column(NAME_COLUMN)?;
        let link_col = self.column(LINK_COLUMN)?;
        let category_col = self.column(CATEGORY_COLUMN)?;
        let count_col = self.column(COUNT_COLUMN)?;

        let mut records = Vec::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            let row_no = i + 1;
            let cell = |col: usize| row.get(col).map(|c| c.trim()).unwrap_or("");

            let link = cell(link_col);
            let identity = extract_identity(link).ok_or_else(|| ParseError::MissingIdentity {
                fragment: self.source.clone(),
                row: row_no,
                value: link.to_string(),
            })?;

            let raw_count = cell(count_col);
            let count = parse_count(raw_count).ok_or_else(|| ParseError::InvalidCount {
                fragment: self.source.clone(),
                row: row_no,
                value: raw_count.to_string(),
            })?;

            records.push(EntityRecord {
                identity,
                display_name: cell(name_col).to_string(),
                category: cell(category_col).to_string(),
                count,
            });
        }

        Ok(records)
    }
}

/// Pulls the member id out of a profile/status link: the digits right
/// after a `u=` token that starts the string or follows `;`, `?`, `&` or `/`.
pub fn extract_identity(value: &str) -> Option<u64> {
    for (pos, _) in value.match_indices("u=") {
        let boundary = value[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| matches!(c, ';' | '?' | '&' | '/'));
        if !boundary {
            continue;
        }

        let digits: String = value[pos + 2..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if let Ok(id) = digits.parse() {
            return Some(id);
        }
    }
    None
}

/// Plain digits, or digits grouped in threes by commas ("1,234").
fn parse_count(value: &str) -> Option<u64> {
    let mut groups = value.split(',');
    let lead = groups.next()?;
    let lead_ok = if value.contains(',') {
        (1..=3).contains(&lead.len())
    } else {
        !lead.is_empty()
    };
    if !lead_ok || !lead.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut digits = String::with_capacity(value.len());
    digits.push_str(lead);
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    digits.parse().ok()
}

/// Merges both pages into one record list with unique identities. When an
/// identity shows up twice (the list shifted between page fetches), the
/// later row wins and takes the later position.
pub fn normalize(first: &RawFragment, second: &RawFragment) -> Result<Vec<EntityRecord>, ParseError> {
    let mut all = first.records()?;
    all.extend(second.records()?);

    let last_seen: HashMap<u64, usize> = all
        .iter()
        .enumerate()
        .map(|(i, r)| (r.identity, i))
        .collect();

    let total = all.len();
    let records: Vec<EntityRecord> = all
        .into_iter()
        .enumerate()
        .filter(|(i, r)| last_seen[&r.identity] == *i)
        .map(|(_, r)| r)
        .collect();

    if records.len() != total {
        debug!(duplicates = total - records.len(), "dropped rows repeated across pages");
    }

    Ok(records)
}
