//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes.

use crate::{Coordinate, Result};

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculates the great-circle distance between two coordinates in meters.
///
/// Both coordinates are validated first; out-of-range or non-finite
/// components fail with [`GeoError::InvalidCoordinate`](crate::GeoError).
///
/// # Example
/// ```
/// use tac_geo::{distance, Coordinate};
///
/// let colosseum = Coordinate::new(41.8902, 12.4922);
/// let pantheon = Coordinate::new(41.8986, 12.4769);
///
/// let meters = distance(&colosseum, &pantheon).unwrap();
/// assert!((meters - 1575.0).abs() < 25.0);
/// ```
pub fn distance(from: &Coordinate, to: &Coordinate) -> Result<f64> {
    from.validate()?;
    to.validate()?;
    Ok(haversine_distance_meters(from, to))
}

/// Great-circle distance in meters without range checks.
///
/// Use when both coordinates are already known to be valid.
#[inline]
pub fn haversine_distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` slightly outside [0, 1] near identical or antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoError;
    use proptest::prelude::*;

    const ROME_DEFAULT: Coordinate = Coordinate { latitude: 41.8992, longitude: 12.5450 };
    const ROME_TERMINI: Coordinate = Coordinate { latitude: 41.9028, longitude: 12.4964 };
    const BERLIN: Coordinate = Coordinate { latitude: 52.5200, longitude: 13.4050 };
    const PARIS: Coordinate = Coordinate { latitude: 48.8566, longitude: 2.3522 };

    #[test]
    fn test_rome_known_distance() {
        // Default map center to Termini, ~4.04 km along the great circle
        let d = distance(&ROME_DEFAULT, &ROME_TERMINI).unwrap();
        assert!((d - 4042.0).abs() < 50.0, "Rome: {}", d);
    }

    #[test]
    fn test_berlin_to_paris() {
        let d = haversine_distance_meters(&BERLIN, &PARIS);
        // Expected: ~878 km
        assert!((d - 878_000.0).abs() < 5_000.0, "Berlin-Paris: {}", d);
    }

    #[test]
    fn test_same_point_zero_distance() {
        assert_eq!(haversine_distance_meters(&ROME_DEFAULT, &ROME_DEFAULT), 0.0);
    }

    #[test]
    fn test_antipodal_points_finite() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 180.0);
        let d = haversine_distance_meters(&a, &b);
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_M;
        assert!(d.is_finite());
        assert!((d - half_circumference).abs() < 1.0, "antipodal: {}", d);

        let pole_to_pole = haversine_distance_meters(
            &Coordinate::new(90.0, 0.0),
            &Coordinate::new(-90.0, 0.0),
        );
        assert!((pole_to_pole - half_circumference).abs() < 1.0);
    }

    #[test]
    fn test_short_distance_precision() {
        // ~14 m apart
        let a = Coordinate::new(41.9000, 12.5000);
        let b = Coordinate::new(41.9001, 12.5001);
        let d = haversine_distance_meters(&a, &b);
        assert!((d - 13.9).abs() < 0.5, "short: {}", d);
    }

    #[test]
    fn test_invalid_coordinate_rejected() {
        let bad = Coordinate::new(95.0, 12.0);
        assert!(matches!(
            distance(&bad, &ROME_DEFAULT),
            Err(GeoError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            distance(&ROME_DEFAULT, &Coordinate::new(0.0, f64::NAN)),
            Err(GeoError::InvalidCoordinate(_))
        ));
    }

    fn coordinate() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| Coordinate::new(lat, lng))
    }

    proptest! {
        #[test]
        fn prop_symmetric(a in coordinate(), b in coordinate()) {
            let ab = haversine_distance_meters(&a, &b);
            let ba = haversine_distance_meters(&b, &a);
            prop_assert!((ab - ba).abs() < 1e-6);
        }

        #[test]
        fn prop_identity(a in coordinate()) {
            prop_assert_eq!(haversine_distance_meters(&a, &a), 0.0);
        }

        #[test]
        fn prop_non_negative_and_bounded(a in coordinate(), b in coordinate()) {
            let d = haversine_distance_meters(&a, &b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_M + 1e-6);
        }

        #[test]
        fn prop_triangle_inequality(a in coordinate(), b in coordinate(), c in coordinate()) {
            let ac = haversine_distance_meters(&a, &c);
            let ab = haversine_distance_meters(&a, &b);
            let bc = haversine_distance_meters(&b, &c);
            // sqrt(1 - a) loses precision near antipodes
            prop_assert!(ac <= ab + bc + 1.0);
        }
    }
}
