//! Disk store for the cached station record.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::{CachedStation, StationId};

/// Default cache file, relative to the working directory.
pub const DEFAULT_CACHE_PATH: &str = "current_wx.json";

/// Errors reading or writing the cache file.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to read cache file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write cache file {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to create cache directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("invalid cache file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize cache: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// JSON file holding one [`CachedStation`].
///
/// The file is always read and written whole.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the record.
    ///
    /// A missing file is not an error: an initial record for `station` is
    /// written and returned instead.
    pub fn load_or_init(
        &self,
        station: &StationId,
        now: DateTime<Utc>,
    ) -> Result<CachedStation, PersistenceError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no cache file, creating one");
                let initial = CachedStation::initial(station.clone(), now);
                self.save(&initial)?;
                return Ok(initial);
            }
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&contents).map_err(|source| PersistenceError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the file with `cached`.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, cached: &CachedStation) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|source| PersistenceError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(cached).map_err(PersistenceError::Serialize)?;

        std::fs::write(&self.path, json).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Get the cache file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_PATH)
    }
}
