//! Deciding whether the cached weather needs a refresh.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{CachedStation, StationId};

/// Default minimum time between refreshes.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(60);

/// Which refresh gates fired for one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Staleness {
    /// The caller asked for a refresh regardless.
    pub forced: bool,
    /// The cache holds a different station than the one requested.
    pub airport_changed: bool,
    /// The cache has never held a decoded report.
    pub empty: bool,
    /// The last refresh is older than the update interval.
    pub expired: bool,
}

impl Staleness {
    /// Evaluate every gate. Pure: depends only on the arguments.
    pub fn assess(
        cached: &CachedStation,
        requested: &StationId,
        now: DateTime<Utc>,
        force: bool,
        interval: Duration,
    ) -> Self {
        let since_update = now.timestamp().saturating_sub(cached.last_update_epoch);
        let interval_secs = i64::try_from(interval.as_secs()).unwrap_or(i64::MAX);
        Self {
            forced: force,
            airport_changed: cached.station != *requested,
            empty: cached.is_empty(),
            expired: since_update > interval_secs,
        }
    }

    pub fn update_needed(&self) -> bool {
        self.forced || self.airport_changed || self.empty || self.expired
    }

    /// Names of the gates that fired, for logging.
    pub fn reasons(&self) -> Vec<&'static str> {
        [
            (self.forced, "forced"),
            (self.airport_changed, "airport changed"),
            (self.empty, "cache empty"),
            (self.expired, "expired"),
        ]
        .into_iter()
        .filter_map(|(fired, name)| fired.then_some(name))
        .collect()
    }
}

/// Whether the cache must be refreshed for `requested`.
///
/// The gates that fired are logged at debug level; the returned flag is the
/// only decision.
pub fn update_needed(
    cached: &CachedStation,
    requested: &StationId,
    now: DateTime<Utc>,
    force: bool,
    interval: Duration,
) -> bool {
    let staleness = Staleness::assess(cached, requested, now, force, interval);
    debug!(
        station = %requested,
        cached_station = %cached.station,
        reasons = ?staleness.reasons(),
        "staleness evaluated"
    );
    staleness.update_needed()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(NOW, 0).unwrap()
    }

    fn kcgi() -> StationId {
        StationId::parse("KCGI").unwrap()
    }

    /// A populated cache for KCGI refreshed `age_secs` ago.
    fn cached(age_secs: i64) -> CachedStation {
        let mut c = CachedStation::initial(kcgi(), now());
        c.last_update_epoch = NOW - age_secs;
        c.weather.reported.epoch = NOW - age_secs - 300;
        c
    }

    #[test]
    fn fresh_cache_needs_nothing() {
        let s = Staleness::assess(&cached(10), &kcgi(), now(), false, DEFAULT_UPDATE_INTERVAL);
        assert_eq!(s, Staleness::default());
        assert!(!s.update_needed());
        assert!(s.reasons().is_empty());
        assert!(!update_needed(&cached(10), &kcgi(), now(), false, DEFAULT_UPDATE_INTERVAL));
    }

    #[test]
    fn force_always_wins() {
        for age in [0, 10, 3600] {
            assert!(update_needed(&cached(age), &kcgi(), now(), true, DEFAULT_UPDATE_INTERVAL));
        }
    }

    #[test]
    fn empty_cache_needs_update_even_if_recent() {
        let mut c = cached(0);
        c.weather.reported.epoch = 0;

        let s = Staleness::assess(&c, &kcgi(), now(), false, DEFAULT_UPDATE_INTERVAL);
        assert!(s.empty);
        assert!(!s.expired);
        assert!(s.update_needed());
        assert_eq!(s.reasons(), vec!["cache empty"]);
    }

    #[test]
    fn airport_change_needs_update() {
        let other = StationId::parse("KSTL").unwrap();
        let s = Staleness::assess(&cached(5), &other, now(), false, DEFAULT_UPDATE_INTERVAL);
        assert!(s.airport_changed);
        assert!(s.update_needed());
    }

    #[test]
    fn expiry_is_strictly_greater_than_interval() {
        let at_limit = Staleness::assess(&cached(60), &kcgi(), now(), false, DEFAULT_UPDATE_INTERVAL);
        assert!(!at_limit.expired);

        let past_limit =
            Staleness::assess(&cached(61), &kcgi(), now(), false, DEFAULT_UPDATE_INTERVAL);
        assert!(past_limit.expired);
        assert!(past_limit.update_needed());
    }

    #[test]
    fn custom_interval() {
        let interval = Duration::from_secs(900);
        assert!(!update_needed(&cached(600), &kcgi(), now(), false, interval));
        assert!(update_needed(&cached(901), &kcgi(), now(), false, interval));
    }

    #[test]
    fn huge_interval_never_expires() {
        let s = Staleness::assess(&cached(3600), &kcgi(), now(), false, Duration::MAX);
        assert!(!s.expired);
        assert!(!s.update_needed());
    }

    #[test]
    fn extreme_last_update_does_not_overflow() {
        let mut c = cached(0);
        c.last_update_epoch = i64::MIN;
        let s = Staleness::assess(&c, &kcgi(), now(), false, DEFAULT_UPDATE_INTERVAL);
        assert!(s.expired);

        c.last_update_epoch = i64::MAX;
        let s = Staleness::assess(&c, &kcgi(), now(), false, DEFAULT_UPDATE_INTERVAL);
        assert!(!s.expired);
    }

    #[test]
    fn reasons_list_every_gate() {
        let mut c = cached(3600);
        c.weather.reported.epoch = 0;
        let other = StationId::parse("KSTL").unwrap();

        let s = Staleness::assess(&c, &other, now(), true, DEFAULT_UPDATE_INTERVAL);
        assert_eq!(
            s.reasons(),
            vec!["forced", "airport changed", "cache empty", "expired"]
        );
    }
}
