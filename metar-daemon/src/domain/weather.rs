//! Decoded weather snapshot.
//!
//! `StructuredWeather` is the internal form of one METAR after decoding. The
//! decode pipeline fills it field by field; each extractor owns only its own
//! fields, so a default value is a valid starting point for every stage.

use serde::{Deserialize, Serialize};

use super::units::{DegreesMagnetic, Feet, InHg, Knots, StatuteMiles};

/// Calendar day and hour of the report in one time zone.
///
/// The all-zero value stands in for a timestamp that could not be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHour {
    pub day: u8,
    pub hour: u8,
}

/// When the observation was made and how old it is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reported {
    /// Observation time, Unix seconds. Zero means "never reported".
    pub epoch: i64,
    /// Minutes between the observation and the moment of decoding.
    pub age_minutes: i64,
    pub zulu: DayHour,
    pub local: DayHour,
}

/// Surface wind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wind {
    pub direction: DegreesMagnetic,
    pub speed: Knots,
    pub gusts: Option<Knots>,
    pub variable: bool,
    /// Set exactly when both direction and speed are zero.
    pub calm: bool,
}

/// One cloud layer, in report order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudLayer {
    /// Layer base above ground. Clear-sky entries carry no base.
    pub base: Option<Feet>,
    /// Human-readable coverage ("few", "broken", ...) or the upstream code.
    pub coverage: String,
}

/// Ambient and dewpoint temperature, degrees Celsius.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Temperatures {
    pub ambient: i32,
    pub dewpoint: i32,
    pub ambient_exact: f64,
    pub dewpoint_exact: f64,
}

/// A fully decoded METAR.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredWeather {
    pub reported: Reported,
    pub wind: Wind,
    pub visibility: Option<StatuteMiles>,
    pub clouds: Vec<CloudLayer>,
    pub temps: Temperatures,
    pub altimeter: InHg,
    pub remarks: Vec<String>,
    /// Flight category as computed upstream (VFR, MVFR, IFR, LIFR).
    pub flight_category: Option<String>,
}
