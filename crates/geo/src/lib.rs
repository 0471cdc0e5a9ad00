//! Geo-proximity queries for TAC parking lookup.
//!
//! This crate provides:
//! - Haversine great-circle distance in meters
//! - Radius queries over parking spot candidates, in input order
//! - Nearest-first ranking for result lists
//! - WASM bindings for embedding in a browser map
//!
//! # Example
//!
//! ```
//! use tac_geo::{distance, Coordinate};
//!
//! let termini = Coordinate::new(41.9028, 12.4964);
//! let colosseum = Coordinate::new(41.8902, 12.4922);
//!
//! let meters = distance(&termini, &colosseum).unwrap();
//! assert!((meters - 1440.0).abs() < 50.0);
//! ```

mod error;
mod haversine;
pub mod proximity;
mod spot;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{distance, haversine_distance_meters, EARTH_RADIUS_M};
pub use proximity::{find_within_radius, ColocatedPolicy, ProximityFilter, SpotMatch};
pub use spot::{spots_from_rows, ParkingSpot, SpotId};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// No range check is done here; see [`Coordinate::try_new`].
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate, rejecting out-of-range or non-finite values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        coord.validate()?;
        Ok(coord)
    }

    /// Returns true if the coordinate has valid values.
    ///
    /// NaN fails every comparison, so it is rejected too.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Checks the ranges, naming the offending component on failure.
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(GeoError::InvalidCoordinate(format!(
                "latitude {} outside [-90, 90]",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(GeoError::InvalidCoordinate(format!(
                "longitude {} outside [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_creation() {
        let coord = Coordinate::new(41.8992, 12.5450);
        assert_eq!(coord.latitude, 41.8992);
        assert_eq!(coord.longitude, 12.5450);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::NEG_INFINITY).is_valid());
    }

    #[test]
    fn test_try_new_names_component() {
        let err = Coordinate::try_new(41.9, -181.0).unwrap_err();
        assert!(err.to_string().contains("longitude"));
        assert!(Coordinate::try_new(41.9, 12.5).is_ok());
    }

    #[test]
    fn test_coordinate_from_tuple() {
        let coord: Coordinate = (41.8992, 12.5450).into();
        assert_eq!(coord.latitude, 41.8992);
    }

    #[test]
    fn test_display() {
        assert_eq!(Coordinate::new(41.9, 12.5).to_string(), "(41.900000, 12.500000)");
    }
}
