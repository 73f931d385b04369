use std::fmt;

use crate::geo_math;

/// A device fix. Replaced wholesale on every position update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above mean sea level, when the receiver reports it.
    pub altitude: Option<f64>,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}°, {:.6}°)", self.latitude, self.longitude)?;
        if let Some(altitude) = self.altitude {
            write!(f, " {:.1}m", altitude)?;
        }
        Ok(())
    }
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
        }
    }

    pub fn with_altitude(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: Some(altitude),
        }
    }

    /// Initial great-circle bearing from this coordinate to another.
    /// Returns degrees in `[0, 360)`, where 0 is North.
    pub fn bearing_to(&self, other: &Coordinate) -> f64 {
        geo_math::bearing(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }

    /// Great-circle distance to another coordinate in meters.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        geo_math::distance_meters(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }

    /// DMS rendering with cardinals, e.g. `51° 30' 26" N 0° 7' 40" W`.
    pub fn to_dms(&self) -> String {
        geo_math::format_dms(self.latitude, self.longitude)
    }

    /// Altitude in whole meters; an unreported altitude reads as `"0m"`.
    pub fn elevation(&self) -> String {
        geo_math::format_elevation(self.altitude.unwrap_or(0.0))
    }
}
