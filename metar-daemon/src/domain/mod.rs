//! Domain types for the METAR daemon.
//!
//! These types describe validated, decoded weather state. Station
//! identifiers enforce their invariants at construction time, so code that
//! receives a `StationId` can trust its validity.

mod cached;
mod station;
mod units;
mod weather;

pub use cached::CachedStation;
pub use station::{InvalidStationId, StationId};
pub use units::{
    DegreesMagnetic, FEET_PER_METER, Feet, InHg, Knots, StatuteMiles, meters_to_feet,
};
pub use weather::{CloudLayer, DayHour, Reported, StructuredWeather, Temperatures, Wind};
