//! One update cycle: check staleness, fetch, decode, reconcile, persist.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::decode::{FieldParseError, decode_report};
use crate::domain::{CachedStation, StationId, StructuredWeather};
use crate::fetch::{FetchError, RawReport, ReportSource};
use crate::reconcile::reconcile;
use crate::staleness::{DEFAULT_UPDATE_INTERVAL, Staleness};
use crate::store::{CacheStore, PersistenceError};

/// Default number of fetch attempts per cycle.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Errors that abort an update cycle.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("decode failed: {0}")]
    Decode(#[from] FieldParseError),

    #[error("cache error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// What the caller asked for.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub station: StationId,
    /// Refresh even if the cache is fresh.
    pub force: bool,
    pub max_attempts: u32,
    pub interval: Duration,
}

impl UpdateRequest {
    pub fn new(station: StationId) -> Self {
        Self {
            station,
            force: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_UPDATE_INTERVAL,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// How a cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The cache was fresh; nothing was fetched.
    Skipped { cached: CachedStation },
    /// A report was fetched and the cache rewritten.
    Refreshed {
        cached: CachedStation,
        report: Box<RawReport>,
        /// False when the service returned the observation already cached.
        observation_changed: bool,
    },
}

impl UpdateOutcome {
    /// The cache record after the cycle.
    pub fn cached(&self) -> &CachedStation {
        match self {
            UpdateOutcome::Skipped { cached } | UpdateOutcome::Refreshed { cached, .. } => cached,
        }
    }
}

/// Run one update cycle at time `now`.
pub async fn run_update<S: ReportSource>(
    source: &S,
    store: &CacheStore,
    request: &UpdateRequest,
    now: DateTime<Utc>,
) -> Result<UpdateOutcome, UpdateError> {
    info!(station = %request.station, "update triggered");

    let mut cached = store.load_or_init(&request.station, now)?;

    let staleness = Staleness::assess(
        &cached,
        &request.station,
        now,
        request.force,
        request.interval,
    );
    debug!(reasons = ?staleness.reasons(), "staleness evaluated");
    if !staleness.update_needed() {
        info!(station = %request.station, "cache is fresh");
        return Ok(UpdateOutcome::Skipped { cached });
    }

    let report = source
        .fetch_report(&request.station, request.max_attempts)
        .await?;

    let observation_changed =
        staleness.airport_changed || cached.weather.reported.epoch != report.obs_time;
    debug!(observation_changed, obs_time = report.obs_time, "report fetched");

    let mut decoded = StructuredWeather::default();
    decode_report(&report, now, &mut decoded)?;
    reconcile(&mut cached, decoded, &report, now);
    store.save(&cached)?;

    info!(station = %cached.station, "cache updated");
    Ok(UpdateOutcome::Refreshed {
        cached,
        report: Box::new(report),
        observation_changed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::tempdir;

    use crate::fetch::fixtures::sample_report;

    /// Serves a fixed result and counts calls.
    struct CannedSource {
        report: Option<RawReport>,
        calls: Cell<u32>,
    }

    impl CannedSource {
        fn ok(report: RawReport) -> Self {
            Self {
                report: Some(report),
                calls: Cell::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                report: None,
                calls: Cell::new(0),
            }
        }
    }

    impl ReportSource for CannedSource {
        async fn fetch_report(
            &self,
            station: &StationId,
            _max_attempts: u32,
        ) -> Result<RawReport, FetchError> {
            self.calls.set(self.calls.get() + 1);
            self.report.clone().ok_or_else(|| FetchError::EmptyResult {
                station: station.to_string(),
            })
        }
    }

    fn kcgi() -> StationId {
        StationId::parse("KCGI").unwrap()
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[tokio::test]
    async fn first_run_fetches_and_persists() {
        let dir = tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("wx.json"));
        let report = sample_report();
        let now = at(report.obs_time + 300);
        let source = CannedSource::ok(report.clone());

        let outcome = run_update(&source, &store, &UpdateRequest::new(kcgi()), now)
            .await
            .unwrap();

        assert_eq!(source.calls.get(), 1);
        match &outcome {
            UpdateOutcome::Refreshed {
                observation_changed,
                ..
            } => assert!(*observation_changed),
            other => panic!("expected refresh, got {other:?}"),
        }

        let cached = outcome.cached();
        assert_eq!(cached.weather.reported.epoch, report.obs_time);
        assert_eq!(cached.weather.reported.age_minutes, 5);
        assert_eq!(cached.last_update_epoch, now.timestamp());
        assert_eq!(cached.elevation, 341);
        assert!(cached.weather.wind.variable);

        // What was returned is what was written
        let on_disk = store.load_or_init(&kcgi(), now).unwrap();
        assert_eq!(&on_disk, cached);
    }

    #[tokio::test]
    async fn fresh_cache_skips_fetch() {
        let dir = tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("wx.json"));
        let report = sample_report();
        let source = CannedSource::ok(report.clone());
        let request = UpdateRequest::new(kcgi());

        let t0 = at(report.obs_time + 60);
        run_update(&source, &store, &request, t0).await.unwrap();

        let outcome = run_update(&source, &store, &request, at(t0.timestamp() + 30))
            .await
            .unwrap();

        assert!(matches!(outcome, UpdateOutcome::Skipped { .. }));
        assert_eq!(source.calls.get(), 1);
    }

    #[tokio::test]
    async fn force_refetches_and_notes_unchanged_observation() {
        let dir = tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("wx.json"));
        let report = sample_report();
        let source = CannedSource::ok(report.clone());

        let t0 = at(report.obs_time + 60);
        run_update(&source, &store, &UpdateRequest::new(kcgi()), t0)
            .await
            .unwrap();

        let forced = UpdateRequest::new(kcgi()).with_force(true);
        let t1 = at(t0.timestamp() + 10);
        let outcome = run_update(&source, &store, &forced, t1).await.unwrap();

        assert_eq!(source.calls.get(), 2);
        match outcome {
            UpdateOutcome::Refreshed {
                cached,
                observation_changed,
                ..
            } => {
                assert!(!observation_changed);
                assert_eq!(cached.last_update_epoch, t1.timestamp());
            }
            other => panic!("expected refresh, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn expired_cache_refetches() {
        let dir = tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("wx.json"));
        let report = sample_report();
        let source = CannedSource::ok(report.clone());
        let request = UpdateRequest::new(kcgi()).with_interval(Duration::from_secs(120));

        let t0 = at(report.obs_time + 60);
        run_update(&source, &store, &request, t0).await.unwrap();
        let outcome = run_update(&source, &store, &request, at(t0.timestamp() + 121))
            .await
            .unwrap();

        assert!(matches!(outcome, UpdateOutcome::Refreshed { .. }));
        assert_eq!(source.calls.get(), 2);
    }

    #[tokio::test]
    async fn station_change_updates_identity() {
        let dir = tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("wx.json"));
        let kstl = StationId::parse("KSTL").unwrap();
        store
            .save(&CachedStation::initial(kstl, at(1_000)))
            .unwrap();

        let report = sample_report();
        let source = CannedSource::ok(report.clone());
        let outcome = run_update(
            &source,
            &store,
            &UpdateRequest::new(kcgi()),
            at(report.obs_time),
        )
        .await
        .unwrap();

        let cached = outcome.cached();
        assert_eq!(cached.station, kcgi());
        assert_eq!(cached.elevation, 341);
    }

    #[tokio::test]
    async fn fetch_failure_leaves_cache_untouched() {
        let dir = tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("wx.json"));
        let before = CachedStation::initial(kcgi(), at(1_000));
        store.save(&before).unwrap();

        let err = run_update(
            &CannedSource::failing(),
            &store,
            &UpdateRequest::new(kcgi()),
            at(2_000),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, UpdateError::Fetch(FetchError::EmptyResult { .. })));
        assert_eq!(store.load_or_init(&kcgi(), at(3_000)).unwrap(), before);
    }

    #[tokio::test]
    async fn decode_failure_is_fatal() {
        let dir = tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("wx.json"));
        let mut report = sample_report();
        report.raw_ob = "KCGI 142253Z 18005KT AX002".into();

        let err = run_update(
            &CannedSource::ok(report.clone()),
            &store,
            &UpdateRequest::new(kcgi()),
            at(report.obs_time),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, UpdateError::Decode(_)));
        assert!(err.to_string().starts_with("decode failed: malformed altimeter"));
    }

    #[test]
    fn request_builder() {
        let request = UpdateRequest::new(kcgi())
            .with_force(true)
            .with_max_attempts(2)
            .with_interval(Duration::from_secs(300));

        assert!(request.force);
        assert_eq!(request.max_attempts, 2);
        assert_eq!(request.interval, Duration::from_secs(300));
        assert_eq!(UpdateRequest::new(kcgi()).max_attempts, DEFAULT_MAX_ATTEMPTS);
    }
}
