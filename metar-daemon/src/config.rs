//! Daemon configuration file.
//!
//! A JSON document at `$XDG_CONFIG_HOME/metar-daemon/config.json` (or
//! `$HOME/.config/metar-daemon/config.json`). Every key is optional.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{InvalidStationId, StationId};
use crate::fetch::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, ReportClientConfig};
use crate::staleness::DEFAULT_UPDATE_INTERVAL;
use crate::store::DEFAULT_CACHE_PATH;
use crate::update::DEFAULT_MAX_ATTEMPTS;

/// Station used when neither the config file nor the command line names one.
pub const DEFAULT_AIRPORT: &str = "KCGI";

const APP_DIR: &str = "metar-daemon";
const CONFIG_FILE: &str = "config.json";

/// Errors loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Settings for one daemon run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// Station identifier, validated when used.
    pub airport: String,
    pub cache_path: PathBuf,
    /// Minimum seconds between refreshes.
    pub update_interval_secs: u64,
    /// Fetch attempts per cycle.
    pub max_attempts: u32,
    pub base_url: String,
    /// Per-attempt request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            airport: DEFAULT_AIRPORT.to_string(),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            update_interval_secs: DEFAULT_UPDATE_INTERVAL.as_secs(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl DaemonConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Load from the standard location, or the defaults if there is none.
    pub fn load_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// The configured station, validated.
    pub fn station(&self) -> Result<StationId, InvalidStationId> {
        StationId::parse(&self.airport.to_ascii_uppercase())
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs)
    }

    pub fn client_config(&self) -> ReportClientConfig {
        ReportClientConfig::new()
            .with_base_url(&self.base_url)
            .with_timeout(self.timeout_secs)
    }
}

/// The standard config file location, from the process environment.
pub fn default_config_path() -> Option<PathBuf> {
    config_path_from(std::env::var_os("XDG_CONFIG_HOME"), std::env::var_os("HOME"))
}

/// Resolve the config file location: `XDG_CONFIG_HOME` if set and non-empty,
/// otherwise `HOME/.config`.
pub fn config_path_from(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let base = match xdg_config_home.filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(home.filter(|dir| !dir.is_empty())?).join(".config"),
    };
    Some(base.join(APP_DIR).join(CONFIG_FILE))
}
