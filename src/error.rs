//! Error types for the fallible edges of the game: tuning data, settings and
//! the player store. The simulation itself is infallible.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load or validate tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tuning file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("difficulty tiers must not be empty")]
    NoTiers,
    #[error("first difficulty tier must start at score 0, found {0}")]
    FirstTierThreshold(u32),
    #[error("difficulty thresholds must strictly increase ({previous} then {next})")]
    ThresholdOrder { previous: u32, next: u32 },
    #[error("spawn interval must be positive (threshold {threshold})")]
    ZeroInterval { threshold: u32 },
    #[error("starting lives must be at least 1")]
    NoLives,
    #[error("{field} must be positive, found {value}")]
    NonPositive { field: &'static str, value: f32 },
}

/// Failure to load or save player settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine a config directory")]
    NoConfigDir,
    #[error("settings I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings JSON invalid: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure in the player registry
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("name already exists: {0}")]
    DuplicateUser(String),
    #[error("player name must not be blank")]
    BlankName,
    #[error("unknown player: {0}")]
    UnknownUser(String),
    #[error("failed to create data dir {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
