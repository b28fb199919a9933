//! High-score persistence.
//!
//! The only durable state is one integer stored as `{"highscore": N}`. Any
//! failure reading it counts as zero and any failure writing it is logged and
//! ignored; a broken file must never stop a game.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::HighScoreError;

pub trait HighScoreStore {
    fn load(&self) -> Result<u32, HighScoreError>;
    fn save(&mut self, value: u32) -> Result<(), HighScoreError>;
}

/// Read the stored value, treating a missing or corrupt record as zero.
pub fn load_or_zero(store: &dyn HighScoreStore) -> u32 {
    match store.load() {
        Ok(value) => value,
        Err(HighScoreError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => 0,
        Err(error) => {
            warn!(error = %error, "high_score_load_failed; treating as 0");
            0
        }
    }
}

/// Write `value`, logging instead of failing.
pub fn persist(store: &mut dyn HighScoreStore, value: u32) {
    if let Err(error) = store.save(value) {
        warn!(error = %error, value, "high_score_save_failed");
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    #[serde(default)]
    highscore: u32,
}

/// JSON file on disk, replaced atomically on every save.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> HighScoreError {
        HighScoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u32, HighScoreError> {
        let text = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let record: HighScoreRecord =
            serde_json::from_str(&text).map_err(|source| HighScoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        Ok(record.highscore)
    }

    fn save(&mut self, value: u32) -> Result<(), HighScoreError> {
        let text = serde_json::to_string(&HighScoreRecord { highscore: value }).map_err(
            |source| HighScoreError::Parse {
                path: self.path.clone(),
                source,
            },
        )?;
        write_text_atomic(&self.path, &text).map_err(|e| self.io_error(e))
    }
}

fn write_text_atomic(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = temp_path_for(path);
    fs::write(&tmp_path, text)?;
    if let Err(error) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("highscore");
    path.with_file_name(format!("{file_name}.tmp"))
}

/// In-process store, for tests and for running without a writable disk.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        Self {
            value: Some(value),
            saves: 0,
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }

    /// Number of successful saves so far.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32, HighScoreError> {
        Ok(self.value.unwrap_or(0))
    }

    fn save(&mut self, value: u32) -> Result<(), HighScoreError> {
        self.value = Some(value);
        self.saves += 1;
        Ok(())
    }
}
