//! Raw METAR decoding.
//!
//! Turns a [`RawReport`] into a [`StructuredWeather`]. Fields the service
//! already provides as JSON (temperatures, cloud layers, timestamps, flight
//! category) are copied across; the rest is decoded from the raw report text
//! by an ordered pipeline of extractors over an immutable token sequence.
//!
//! Pipeline order: altimeter, wind, present weather, remarks. A malformed
//! numeric sub-token aborts the decode; a malformed timestamp does not.

mod error;
mod extract;
mod time;
mod tokens;

use chrono::{DateTime, Local, TimeZone, Utc};
use tracing::debug;

use crate::domain::{CloudLayer, StructuredWeather, Temperatures};
use crate::fetch::{RawReport, ReportValue};

pub use error::{FieldParseError, TimeParseError};
pub use extract::{extract_altimeter, extract_remarks, extract_weather, extract_wind};
pub use time::{age_minutes, calendar_time, parse_report_time};
pub use tokens::Tokens;

/// One decode stage.
pub type Extractor = fn(&Tokens<'_>, &mut StructuredWeather) -> Result<(), FieldParseError>;

/// The extractor pipeline, in run order.
pub const PIPELINE: [(&str, Extractor); 4] = [
    ("altimeter", extract_altimeter),
    ("wind", extract_wind),
    ("weather", extract_weather),
    ("remarks", extract_remarks),
];

/// Decode `raw` into `out`, using the system's local time zone for the local
/// calendar fields.
pub fn decode_report(
    raw: &RawReport,
    now: DateTime<Utc>,
    out: &mut StructuredWeather,
) -> Result<(), FieldParseError> {
    decode_report_in(raw, now, &Local, out)
}

/// Decode `raw` into `out`, reading local calendar fields in `local`.
///
/// `now` is the decode time; the observation age is measured against it, so
/// decoding the same report later yields a larger age.
pub fn decode_report_in<Tz: TimeZone>(
    raw: &RawReport,
    now: DateTime<Utc>,
    local: &Tz,
    out: &mut StructuredWeather,
) -> Result<(), FieldParseError> {
    out.temps = Temperatures {
        ambient: raw.temp.round() as i32,
        dewpoint: raw.dewp.round() as i32,
        ambient_exact: raw.temp,
        dewpoint_exact: raw.dewp,
    };

    out.reported.age_minutes = age_minutes(raw.obs_time, now);
    out.reported.zulu = calendar_time(&raw.report_time, &Utc);
    out.reported.local = calendar_time(&raw.report_time, local);

    out.clouds = raw
        .clouds
        .iter()
        .map(|layer| CloudLayer {
            base: layer.base,
            coverage: coverage_word(&layer.cover).to_string(),
        })
        .collect();

    out.visibility = raw.visib.as_ref().and_then(ReportValue::leading_number);
    out.flight_category = raw.flt_cat.clone();

    run_pipeline(&Tokens::split(&raw.raw_ob), out)
}

/// Run every extractor in order over `tokens`.
pub fn run_pipeline(tokens: &Tokens<'_>, out: &mut StructuredWeather) -> Result<(), FieldParseError> {
    for (stage, extractor) in PIPELINE {
        extractor(tokens, out)?;
        debug!(stage, "decode stage done");
    }
    Ok(())
}

/// Human-readable word for a cloud coverage code.
pub fn coverage_word(code: &str) -> &str {
    match code {
        "FEW" => "few",
        "SCT" => "scattered",
        "BKN" => "broken",
        "OVC" => "overcast",
        other => other,
    }
}
