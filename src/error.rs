//! Error taxonomy.
//!
//! Only fatal conditions are values here. Degraded lookups, missing
//! optional files and format fallbacks are logged and the run continues.

use std::path::PathBuf;

use thiserror::Error;

/// A raw page fragment did not have the structure we expect. Usually means
/// the forum changed its member list layout.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{fragment}: missing column '{column}'")]
    MissingColumn { fragment: String, column: &'static str },

    #[error("{fragment}, row {row}: no identity token in '{value}'")]
    MissingIdentity {
        fragment: String,
        row: usize,
        value: String,
    },

    #[error("{fragment}, row {row}: count '{value}' is not a non-negative integer")]
    InvalidCount {
        fragment: String,
        row: usize,
        value: String,
    },

    #[error("{fragment}: {source}")]
    Malformed {
        fragment: String,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot i/o on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv snapshot: {0}")]
    Csv(#[from] csv::Error),

    #[error("json snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sqlite snapshot: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("expected exactly 2 pages, got {0}")]
    PageCount(usize),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
