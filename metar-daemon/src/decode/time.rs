//! Report time handling.
//!
//! The service gives each report twice: as Unix seconds (`obsTime`) and as an
//! ISO-8601 UTC string (`reportTime`). The epoch drives the age; the string
//! drives the zulu and local calendar fields.

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Timelike, Utc};
use tracing::warn;

use crate::domain::DayHour;

use super::error::TimeParseError;

/// `2024-11-14T23:00:00Z`, optionally with fractional seconds.
const REPORT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Parse a report timestamp as UTC.
pub fn parse_report_time(s: &str) -> Result<DateTime<Utc>, TimeParseError> {
    NaiveDateTime::parse_from_str(s, REPORT_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| TimeParseError {
            input: s.to_string(),
            source,
        })
}

/// Day and hour of a report timestamp on the calendar of `tz`.
///
/// A malformed timestamp is logged and yields the zero value.
pub fn calendar_time<Tz: TimeZone>(s: &str, tz: &Tz) -> DayHour {
    match parse_report_time(s) {
        Ok(utc) => {
            let t = utc.with_timezone(tz);
            DayHour {
                day: t.day() as u8,
                hour: t.hour() as u8,
            }
        }
        Err(e) => {
            warn!(error = %e, "report time not decoded");
            DayHour::default()
        }
    }
}

/// Whole minutes elapsed between the observation and `now`.
pub fn age_minutes(obs_time: i64, now: DateTime<Utc>) -> i64 {
    now.timestamp().saturating_sub(obs_time) / 60
}
