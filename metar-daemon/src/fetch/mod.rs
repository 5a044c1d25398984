//! Aviation weather data service client.
//!
//! Fetches the latest METAR for a station as JSON. The service returns an
//! array filtered by station; only the first element is relevant.
//!
//! Key characteristics of the service:
//! - Transient failures (timeouts, 408/429/5xx gateway statuses) are retried
//!   with a fixed backoff
//! - Wind direction, wind speed, and visibility are sometimes numbers and
//!   sometimes marker strings ("VRB", "10+")
//! - Unknown stations produce an empty body or an empty array

mod client;
mod error;
mod types;

use std::future::Future;

pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, ReportClient, ReportClientConfig, parse_envelope};
pub use error::{FetchError, is_retryable_status};
pub use types::{RawCloudLayer, RawReport, ReportValue};

use crate::domain::StationId;

/// Anything that can produce the latest raw report for a station.
///
/// The update cycle is written against this trait so it can run against a
/// canned source in tests.
pub trait ReportSource {
    fn fetch_report(
        &self,
        station: &StationId,
        max_attempts: u32,
    ) -> impl Future<Output = Result<RawReport, FetchError>>;
}

impl ReportSource for ReportClient {
    fn fetch_report(
        &self,
        station: &StationId,
        max_attempts: u32,
    ) -> impl Future<Output = Result<RawReport, FetchError>> {
        ReportClient::fetch_report(self, station, max_attempts)
    }
}
