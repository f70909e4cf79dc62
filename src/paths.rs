use std::path::PathBuf;

/// Snapshot path used when neither the command line nor the config file names one.
pub const DEFAULT_SNAPSHOT_FILE: &str = "leaderboard.json";

/// Get the config file path (~/.config/leaderboard/config.toml or platform equivalent)
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "leaderboard")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
