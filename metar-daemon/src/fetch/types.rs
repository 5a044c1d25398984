//! Weather service response DTOs.
//!
//! These types map directly to the JSON records returned by the METAR
//! endpoint. Fields the service sometimes sends as `null` are `Option`;
//! fields whose JSON type varies between a number and a marker string use
//! [`ReportValue`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::StationId;

/// A field that is usually numeric but sometimes a marker string.
///
/// Wind direction arrives as `"VRB"` for variable winds and visibility as
/// `"10+"` for unrestricted visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportValue {
    Numeric(f64),
    Sentinel(String),
}

impl ReportValue {
    /// The numeric value, if this is not a sentinel.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ReportValue::Numeric(v) => Some(*v),
            ReportValue::Sentinel(_) => None,
        }
    }

    /// Best-effort numeric reading: sentinels like `"10+"` yield their
    /// leading number.
    pub fn leading_number(&self) -> Option<f64> {
        match self {
            ReportValue::Numeric(v) => Some(*v),
            ReportValue::Sentinel(s) => {
                let digits = s.trim_end_matches(|c: char| !c.is_ascii_digit());
                digits.parse().ok()
            }
        }
    }
}

impl std::fmt::Display for ReportValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportValue::Numeric(v) => write!(f, "{v}"),
            ReportValue::Sentinel(s) => f.write_str(s),
        }
    }
}

/// One cloud layer as reported upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCloudLayer {
    /// Coverage code: FEW, SCT, BKN, OVC, CLR, ...
    pub cover: String,
    /// Base in feet above ground; absent for clear-sky entries.
    pub base: Option<i32>,
}

/// One METAR record from the weather service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReport {
    pub icao_id: StationId,

    /// When the service received the report.
    #[serde(default)]
    pub receipt_time: Option<String>,

    /// Observation time, Unix seconds.
    pub obs_time: i64,

    /// Observation time as `YYYY-MM-DDTHH:MM:SSZ`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub report_time: String,

    /// METAR or SPECI.
    #[serde(default)]
    pub metar_type: Option<String>,

    /// Temperature, degrees Celsius.
    #[serde(default, deserialize_with = "null_as_default")]
    pub temp: f64,

    /// Dewpoint, degrees Celsius.
    #[serde(default, deserialize_with = "null_as_default")]
    pub dewp: f64,

    /// Wind direction in degrees, or "VRB".
    #[serde(default)]
    pub wdir: Option<ReportValue>,

    /// Wind speed in knots.
    #[serde(default)]
    pub wspd: Option<ReportValue>,

    /// Visibility in statute miles, or "10+".
    #[serde(default)]
    pub visib: Option<ReportValue>,

    /// Altimeter setting, hectopascals.
    #[serde(default, deserialize_with = "null_as_default")]
    pub altim: f64,

    #[serde(default)]
    pub wx_string: Option<String>,

    #[serde(default)]
    pub qc_field: Option<i64>,

    /// Sea-level pressure, hectopascals.
    #[serde(default)]
    pub slp: Option<f64>,

    #[serde(default)]
    pub pres_tend: Option<f64>,
    #[serde(default)]
    pub max_t: Option<f64>,
    #[serde(default)]
    pub min_t: Option<f64>,
    #[serde(default)]
    pub max_t24: Option<f64>,
    #[serde(default)]
    pub min_t24: Option<f64>,
    #[serde(default)]
    pub precip: Option<f64>,
    #[serde(default)]
    pub pcp3hr: Option<f64>,
    #[serde(default)]
    pub pcp6hr: Option<f64>,
    #[serde(default)]
    pub pcp24hr: Option<f64>,
    #[serde(default)]
    pub snow: Option<f64>,
    #[serde(default)]
    pub vert_vis: Option<f64>,

    /// The encoded report text.
    pub raw_ob: String,

    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,

    /// Station elevation, meters.
    #[serde(default)]
    pub elev: f64,

    /// Station name.
    #[serde(default)]
    pub name: Option<String>,

    /// Summary coverage code of the lowest ceiling.
    #[serde(default)]
    pub cover: Option<String>,

    #[serde(default)]
    pub clouds: Vec<RawCloudLayer>,

    /// Flight category computed upstream.
    #[serde(default)]
    pub flt_cat: Option<String>,
}

/// Read `null` as the type's zero value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
