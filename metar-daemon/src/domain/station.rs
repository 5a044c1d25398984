//! Station identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station identifier {input:?}: {reason}")]
pub struct InvalidStationId {
    input: String,
    reason: &'static str,
}

/// A valid four-character ICAO station identifier.
///
/// Identifiers are exactly 4 uppercase ASCII letters or digits (`KCGI`,
/// `K1V4`). Any `StationId` value is valid by construction, including ones
/// read back from the cache file or the weather service.
///
/// # Examples
///
/// ```
/// use metar_daemon::domain::StationId;
///
/// let cgi = StationId::parse("KCGI").unwrap();
/// assert_eq!(cgi.as_str(), "KCGI");
///
/// // Lowercase is rejected
/// assert!(StationId::parse("kcgi").is_err());
///
/// // Wrong length is rejected
/// assert!(StationId::parse("CGI").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(String);

impl StationId {
    /// Parse a station identifier from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        let invalid = |reason| InvalidStationId {
            input: s.to_string(),
            reason,
        };

        if s.len() != 4 {
            return Err(invalid("must be exactly 4 characters"));
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(invalid("must be uppercase ASCII letters or digits"));
        }

        Ok(StationId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationId {
    type Error = InvalidStationId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StationId::parse(&value)
    }
}

impl From<StationId> for String {
    fn from(id: StationId) -> Self {
        id.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
