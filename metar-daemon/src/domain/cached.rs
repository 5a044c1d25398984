//! The persisted per-station aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::station::StationId;
use super::units::Feet;
use super::weather::StructuredWeather;

/// Cached weather state for one station.
///
/// This is the whole content of the cache file. It is read in full and
/// rewritten in full on every update cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedStation {
    pub station: StationId,
    pub elevation: Feet,
    /// Unix seconds of the last successful refresh. Never moves backwards.
    pub last_update_epoch: i64,
    pub weather: StructuredWeather,
}

impl CachedStation {
    /// Initial record used when no cache file exists yet.
    ///
    /// The reported epoch stays zero so that the next staleness check treats
    /// the record as empty and forces a fetch.
    pub fn initial(station: StationId, now: DateTime<Utc>) -> Self {
        Self {
            station,
            elevation: 0,
            last_update_epoch: now.timestamp(),
            weather: StructuredWeather::default(),
        }
    }

    /// Whether the record has never held a decoded report.
    pub fn is_empty(&self) -> bool {
        self.weather.reported.epoch == 0
    }
}
