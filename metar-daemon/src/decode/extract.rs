//! Field extractors.
//!
//! Each extractor scans the immutable token sequence on its own and writes
//! only the field(s) it owns. Token shapes are kept disjoint: the altimeter
//! is the only 5-character token starting with `A`, the wind is the only
//! token ending in `KT`, and remarks only start after the literal `RMK`.

use std::ops::Range;

use tracing::debug;

use crate::domain::{StructuredWeather, Wind};

use super::error::FieldParseError;
use super::tokens::Tokens;

/// Remark tokens with a known meaning.
const REMARK_SENTINELS: [(&str, &str); 2] = [
    ("AO2", "automated station with precipitation discriminator"),
    ("$", "station requires maintenance"),
];

/// Parse `token[range]` as an unsigned decimal number.
fn parse_digits(
    field: &'static str,
    token: &str,
    range: Range<usize>,
) -> Result<u16, FieldParseError> {
    let digits = token
        .get(range)
        .ok_or_else(|| FieldParseError::new(field, token, "token too short"))?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldParseError::new(field, token, "expected digits"));
    }

    digits
        .parse()
        .map_err(|_| FieldParseError::new(field, token, "value out of range"))
}

/// Altimeter setting: `A3002` is 30.02 inHg.
pub fn extract_altimeter(
    tokens: &Tokens<'_>,
    out: &mut StructuredWeather,
) -> Result<(), FieldParseError> {
    if let Some(token) = tokens.find(|t| t.len() == 5 && t.starts_with('A')) {
        let hundredths = parse_digits("altimeter", token, 1..5)?;
        out.altimeter = f64::from(hundredths) / 100.0;
    }
    Ok(())
}

/// Surface wind: `DDDSSKT`, `DDDSSGggKT`, or `VRBSSKT`.
pub fn extract_wind(tokens: &Tokens<'_>, out: &mut StructuredWeather) -> Result<(), FieldParseError> {
    let Some(token) = tokens.find(|t| t.ends_with("KT")) else {
        return Ok(());
    };

    let mut wind = Wind::default();
    if token.starts_with("VRB") {
        wind.variable = true;
        wind.direction = 0;
        wind.speed = parse_digits("wind", token, 3..5)?;
    } else {
        wind.variable = false;
        wind.direction = parse_digits("wind", token, 0..3)?;
        wind.speed = parse_digits("wind", token, 3..5)?;
    }

    wind.gusts = match token.find('G') {
        Some(i) => Some(parse_digits("wind gust", token, i + 1..i + 3)?),
        None => None,
    };

    wind.calm = wind.speed == 0 && wind.direction == 0;
    out.wind = wind;
    Ok(())
}

/// Present weather (RA, BR, +TSRA, ...). Not decoded yet.
pub fn extract_weather(
    _tokens: &Tokens<'_>,
    _out: &mut StructuredWeather,
) -> Result<(), FieldParseError> {
    Ok(())
}

/// Remarks after `RMK`: known sentinels become readable, the rest stay raw.
pub fn extract_remarks(
    tokens: &Tokens<'_>,
    out: &mut StructuredWeather,
) -> Result<(), FieldParseError> {
    out.remarks = match tokens.position("RMK") {
        Some(idx) => tokens.after(idx).iter().map(|t| readable_remark(t)).collect(),
        None => Vec::new(),
    };
    Ok(())
}

fn readable_remark(token: &str) -> String {
    match REMARK_SENTINELS.iter().find(|(code, _)| *code == token) {
        Some((code, meaning)) => {
            debug!(token, "remark matched");
            format!("{code}: {meaning}")
        }
        None => {
            debug!(token, "remark kept raw");
            token.to_string()
        }
    }
}
