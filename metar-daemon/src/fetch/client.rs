//! METAR HTTP client.
//!
//! Issues one GET per attempt against the aviation weather data service and
//! drives the attempts through the retry executor.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::domain::StationId;
use crate::retry::{AttemptError, DEFAULT_BACKOFF, RetryPolicy, run_with_retry};

use super::error::FetchError;
use super::types::RawReport;

/// Default base URL for the data API.
pub const DEFAULT_BASE_URL: &str = "https://aviationweather.gov/api/data";

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the report client.
#[derive(Debug, Clone)]
pub struct ReportClientConfig {
    /// Base URL for the API (defaults to the production service)
    pub base_url: String,
    /// Per-attempt request timeout in seconds
    pub timeout_secs: u64,
    /// Pause between attempts
    pub backoff: Duration,
}

impl ReportClientConfig {
    /// Create a config pointing at the production service.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            backoff: DEFAULT_BACKOFF,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the pause between attempts.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }
}

impl Default for ReportClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the METAR endpoint.
#[derive(Debug, Clone)]
pub struct ReportClient {
    http: reqwest::Client,
    base_url: String,
    backoff: Duration,
}

impl ReportClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ReportClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            backoff: config.backoff,
        })
    }

    /// Fetch the latest report for `station`, retrying transient failures.
    ///
    /// Makes at most `max_attempts` requests (at least one). Returns the
    /// first record of the response array.
    pub async fn fetch_report(
        &self,
        station: &StationId,
        max_attempts: u32,
    ) -> Result<RawReport, FetchError> {
        let policy = RetryPolicy::new(max_attempts).with_backoff(self.backoff);
        let url = format!("{}/metar", self.base_url);
        let url = url.as_str();
        let start = Instant::now();
        let mut attempts = 0;

        let result = run_with_retry(policy, |attempt| {
            attempts = attempt;
            if attempt > 1 {
                info!(
                    station = %station,
                    attempt,
                    max_attempts = policy.max_attempts(),
                    "retrying METAR fetch"
                );
            } else {
                info!(station = %station, "fetching METAR");
            }
            async move {
                self.fetch_once(url, station)
                    .await
                    .map_err(|e| AttemptError::classify(e, FetchError::is_retryable))
            }
        })
        .await;

        let took_ms = start.elapsed().as_millis() as u64;
        match result {
            Ok(report) => {
                info!(station = %station, took_ms, "fetch OK");
                Ok(report)
            }
            Err(err) => {
                warn!(station = %station, attempts, took_ms, error = %err, "fetch failed");
                Err(err)
            }
        }
    }

    /// One request, no retries.
    async fn fetch_once(&self, url: &str, station: &StationId) -> Result<RawReport, FetchError> {
        let response = self
            .http
            .get(url)
            .query(&[("ids", station.as_str()), ("format", "json")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "non-success status");
            return Err(FetchError::from_status(status.as_u16(), body));
        }

        let body = response.text().await?;
        parse_envelope(&body, station)
    }
}

/// Decode the response array and take its first record.
pub fn parse_envelope(body: &str, station: &StationId) -> Result<RawReport, FetchError> {
    if body.trim().is_empty() {
        return Err(FetchError::Decode {
            message: "empty response body".to_string(),
            body: None,
        });
    }

    let reports: Vec<RawReport> = serde_json::from_str(body).map_err(|e| FetchError::Decode {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })?;

    reports
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::EmptyResult {
            station: station.to_string(),
        })
}
