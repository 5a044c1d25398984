//! Unit aliases used throughout the decoded weather model.
//!
//! These are plain aliases rather than newtypes: they document the unit at
//! each field without getting in the way of arithmetic.

/// Wind direction, degrees magnetic (0 when calm or variable).
pub type DegreesMagnetic = u16;

/// Speed in knots.
pub type Knots = u16;

/// Height or elevation in feet.
pub type Feet = i32;

/// Pressure in inches of mercury.
pub type InHg = f64;

/// Visibility in statute miles.
pub type StatuteMiles = f64;

/// Feet per meter, used for station elevation.
pub const FEET_PER_METER: f64 = 3.28084;

/// Convert a height in meters to whole feet, rounding to nearest.
pub fn meters_to_feet(meters: f64) -> Feet {
    (meters * FEET_PER_METER).round() as Feet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meters_to_feet_rounds() {
        assert_eq!(meters_to_feet(0.0), 0);
        assert_eq!(meters_to_feet(100.0), 328);
        // 1.0 m = 3.28084 ft
        assert_eq!(meters_to_feet(1.0), 3);
        assert_eq!(meters_to_feet(-10.0), -33);
    }
}
