//! Folding a freshly decoded report into the cached station record.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{CachedStation, StructuredWeather, meters_to_feet};
use crate::fetch::RawReport;

/// Merge `decoded` (built from `raw`) into `cached`.
///
/// - A different station replaces the id and the elevation, which is the
///   only value read straight from `raw` rather than from `decoded`. A record
///   that has never held a report, or has no elevation yet, also takes the
///   elevation from `raw`.
/// - The weather snapshot is replaced as a whole.
/// - `last_update_epoch` moves to `now`, never backwards.
/// - The reported epoch is the observation time of `raw`.
pub fn reconcile(
    cached: &mut CachedStation,
    decoded: StructuredWeather,
    raw: &RawReport,
    now: DateTime<Utc>,
) {
    if cached.station != raw.icao_id {
        info!(
            from = %cached.station,
            to = %raw.icao_id,
            "station changed"
        );
        cached.station = raw.icao_id.clone();
        cached.elevation = meters_to_feet(raw.elev);
    } else if cached.is_empty() || cached.elevation == 0 {
        cached.elevation = meters_to_feet(raw.elev);
        debug!(station = %cached.station, elevation = cached.elevation, "elevation filled in");
    }

    cached.weather = decoded;
    cached.weather.reported.epoch = raw.obs_time;
    cached.last_update_epoch = cached.last_update_epoch.max(now.timestamp());
}
