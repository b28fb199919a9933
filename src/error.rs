//! Errors for the I/O edges of the game. The simulation itself never fails;
//! these only surface from loading configuration and the high-score file, and
//! callers are expected to fall back to defaults.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("failed to access high score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed high score file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}
