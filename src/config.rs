use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::cli::{RunArgs, ShowArgs};
use crate::error::ConfigError;
use crate::exclude::ExclusionSet;
use crate::paths;
use crate::store::SnapshotFormat;

/// Optional settings from `config.toml`. Command line values win.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub file: Option<PathBuf>,
    pub exclude: Option<PathBuf>,
    pub footer: Option<PathBuf>,
    pub topic: Option<u64>,
}

impl FileConfig {
    /// An explicit path must exist; the default location may be missing.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => match paths::default_config_path() {
                Some(p) => (p, false),
                None => return Ok(FileConfig::default()),
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => Self::parse(&text, &path),
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no config file at {}", path.display());
                Ok(FileConfig::default())
            }
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Everything one run needs, resolved up front and handed to each stage.
pub struct Config {
    pub pages: [PathBuf; 2],
    pub snapshot_path: PathBuf,
    pub format: SnapshotFormat,
    pub exclusions: ExclusionSet,
    pub footer: Option<String>,
    pub topic: Option<u64>,
    pub output: Option<PathBuf>,
    pub simulate: bool,
}

impl Config {
    pub fn from_run_args(args: &RunArgs) -> Result<Self, ConfigError> {
        let file_config = FileConfig::load(args.config.as_deref())?;
        Self::resolve(args, file_config)
    }

    pub fn resolve(args: &RunArgs, file_config: FileConfig) -> Result<Self, ConfigError> {
        let pages: [PathBuf; 2] = args
            .pages
            .clone()
            .try_into()
            .map_err(|pages: Vec<PathBuf>| ConfigError::PageCount(pages.len()))?;

        let snapshot_path = snapshot_path(args.file.as_ref(), file_config.file);
        let format = SnapshotFormat::for_path(&snapshot_path);

        let exclusions = match args.exclude.clone().or(file_config.exclude) {
            Some(path) => ExclusionSet::load(&path),
            None => ExclusionSet::default(),
        };

        let footer = args
            .footer
            .clone()
            .or(file_config.footer)
            .and_then(|path| load_footer(&path));

        Ok(Config {
            pages,
            snapshot_path,
            format,
            exclusions,
            footer,
            topic: args.topic.or(file_config.topic),
            output: args.output.clone(),
            simulate: args.simulate,
        })
    }
}

/// Where `show` reads from.
pub fn show_snapshot_path(args: &ShowArgs) -> Result<PathBuf, ConfigError> {
    let file_config = FileConfig::load(args.config.as_deref())?;
    Ok(snapshot_path(args.file.as_ref(), file_config.file))
}

fn snapshot_path(from_args: Option<&PathBuf>, from_file: Option<PathBuf>) -> PathBuf {
    from_args
        .cloned()
        .or(from_file)
        .unwrap_or_else(|| PathBuf::from(paths::DEFAULT_SNAPSHOT_FILE))
}

/// A missing or empty footer just means the report has none.
fn load_footer(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) if text.is_empty() => None,
        Ok(text) => Some(text),
        Err(e) => {
            warn!("footer {} not read ({e}), posting without one", path.display());
            None
        }
    }
}
