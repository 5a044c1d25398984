//! Report fetcher error types.

/// Status codes worth another attempt.
const RETRYABLE_STATUSES: [u16; 6] = [408, 429, 500, 502, 503, 504];

/// Whether an HTTP status is transient.
pub fn is_retryable_status(status: u16) -> bool {
    RETRYABLE_STATUSES.contains(&status)
}

/// Errors from fetching a METAR.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Network failure or timeout while talking to the service.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a transient error status.
    #[error("retryable status {status}")]
    RetryableStatus { status: u16 },

    /// The service answered with a non-success status that will not improve.
    #[error("API error {status}: {message}")]
    FatalStatus { status: u16, message: String },

    /// The body was empty or not the expected JSON.
    #[error("JSON parse error: {message}")]
    Decode {
        message: String,
        body: Option<String>,
    },

    /// The service returned an empty array for the station.
    #[error("no METAR data for {station}")]
    EmptyResult { station: String },
}

impl FetchError {
    /// Whether another attempt might succeed.
    ///
    /// Timeouts and connection failures are transient; other transport
    /// failures (bad URL, redirect loops, body errors) are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport(e) => e.is_timeout() || e.is_connect(),
            FetchError::RetryableStatus { .. } => true,
            FetchError::Client(_)
            | FetchError::FatalStatus { .. }
            | FetchError::Decode { .. }
            | FetchError::EmptyResult { .. } => false,
        }
    }

    /// Build the error for a non-success status.
    pub fn from_status(status: u16, message: String) -> Self {
        if is_retryable_status(status) {
            FetchError::RetryableStatus { status }
        } else {
            FetchError::FatalStatus { status, message }
        }
    }
}
