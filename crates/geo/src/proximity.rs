//! Radius queries over parking spot candidates.
//!
//! The filter keeps the candidates whose great-circle distance from a center
//! point is within a radius, in their original order. Large candidate sets are
//! evaluated in parallel when the `parallel` feature is enabled; the output
//! is identical either way.

use crate::{haversine_distance_meters, Coordinate, GeoError, ParkingSpot, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default slack added to every radius, in meters.
pub const DEFAULT_TOLERANCE_M: f64 = 0.5;

/// Below this many candidates the sequential path is used even with `parallel`.
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 2048;

/// What to do with candidates sitting on the center itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColocatedPolicy {
    /// Colocated candidates are part of the result
    #[default]
    Include,
    /// Candidates within the tolerance of the center are dropped
    Exclude,
}

impl std::str::FromStr for ColocatedPolicy {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "include" => Ok(Self::Include),
            "exclude" => Ok(Self::Exclude),
            other => Err(GeoError::argument(format!(
                "colocated policy must be \"include\" or \"exclude\", got {other:?}"
            ))),
        }
    }
}

/// Radius filter with configurable tolerance and colocated handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityFilter {
    /// Slack in meters applied to the radius comparison
    pub tolerance_m: f64,
    /// Handling of candidates at the center
    pub colocated: ColocatedPolicy,
}

impl Default for ProximityFilter {
    fn default() -> Self {
        Self {
            tolerance_m: DEFAULT_TOLERANCE_M,
            colocated: ColocatedPolicy::Include,
        }
    }
}

/// A candidate that passed the filter, with its distance from the center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpotMatch<'a> {
    /// The matching spot
    pub spot: &'a ParkingSpot,
    /// Distance from the center in meters
    pub distance_m: f64,
}

impl ProximityFilter {
    /// Creates a filter with default tolerance that includes colocated spots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style method to set the tolerance
    #[must_use]
    pub fn with_tolerance(mut self, tolerance_m: f64) -> Self {
        self.tolerance_m = tolerance_m;
        self
    }

    /// Builder-style method to set the colocated policy
    #[must_use]
    pub fn with_colocated(mut self, colocated: ColocatedPolicy) -> Self {
        self.colocated = colocated;
        self
    }

    /// Returns the candidates within `radius_m` of `center`, in input order.
    ///
    /// # Errors
    /// * [`GeoError::InvalidArgument`] for a negative or non-finite radius
    /// * [`GeoError::InvalidCoordinate`] for an invalid center
    pub fn find_within_radius(
        &self,
        center: &Coordinate,
        radius_m: f64,
        candidates: &[ParkingSpot],
    ) -> Result<Vec<ParkingSpot>> {
        Ok(self
            .find_with_distances(center, radius_m, candidates)?
            .into_iter()
            .map(|m| m.spot.clone())
            .collect())
    }

    /// Like [`find_within_radius`](Self::find_within_radius), but borrows the
    /// matching candidates and reports each one's distance.
    pub fn find_with_distances<'a>(
        &self,
        center: &Coordinate,
        radius_m: f64,
        candidates: &'a [ParkingSpot],
    ) -> Result<Vec<SpotMatch<'a>>> {
        self.check(center, radius_m)?;

        let limit = radius_m + self.tolerance_m;
        let matches = self.measure(center, candidates, |d| d <= limit);

        debug!(
            candidates = candidates.len(),
            matched = matches.len(),
            radius_m,
            "Radius query evaluated"
        );

        Ok(matches)
    }

    /// Returns up to `limit` candidates ordered by ascending distance.
    ///
    /// The colocated policy applies; ties keep input order.
    pub fn nearest<'a>(
        &self,
        center: &Coordinate,
        candidates: &'a [ParkingSpot],
        limit: usize,
    ) -> Result<Vec<SpotMatch<'a>>> {
        center.validate()?;

        let mut matches = self.measure(center, candidates, |_| true);
        matches.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
        matches.truncate(limit);

        Ok(matches)
    }

    fn check(&self, center: &Coordinate, radius_m: f64) -> Result<()> {
        if !radius_m.is_finite() || radius_m < 0.0 {
            return Err(GeoError::argument(format!(
                "radius must be a finite number >= 0, got {radius_m}"
            )));
        }
        if !self.tolerance_m.is_finite() || self.tolerance_m < 0.0 {
            return Err(GeoError::argument(format!(
                "tolerance must be a finite number >= 0, got {}",
                self.tolerance_m
            )));
        }
        center.validate()
    }

    /// Measures every valid candidate and keeps those accepted by `keep`.
    fn measure<'a, F>(
        &self,
        center: &Coordinate,
        candidates: &'a [ParkingSpot],
        keep: F,
    ) -> Vec<SpotMatch<'a>>
    where
        F: Fn(f64) -> bool + Sync,
    {
        let evaluate = |spot: &'a ParkingSpot| -> Option<SpotMatch<'a>> {
            if !spot.location.is_valid() {
                debug!(id = %spot.id, "Skipping spot with invalid location");
                return None;
            }
            let distance_m = haversine_distance_meters(center, &spot.location);
            if self.colocated == ColocatedPolicy::Exclude && distance_m <= self.tolerance_m {
                return None;
            }
            keep(distance_m).then_some(SpotMatch { spot, distance_m })
        };

        #[cfg(feature = "parallel")]
        {
            if candidates.len() >= PARALLEL_THRESHOLD {
                use rayon::prelude::*;
                // Collecting into a Vec keeps input order.
                return candidates.par_iter().filter_map(evaluate).collect();
            }
        }

        candidates.iter().filter_map(evaluate).collect()
    }
}

/// Returns the candidates within `radius_m` meters of `center`, in input order.
///
/// Uses a [`ProximityFilter`] with the default 0.5 m tolerance, so a zero
/// radius matches only spots coincident with the center.
///
/// # Example
/// ```
/// use tac_geo::{find_within_radius, Coordinate, ParkingSpot};
///
/// let center = Coordinate::new(41.9000, 12.5000);
/// let spots = vec![
///     ParkingSpot::new(1i64, 41.9001, 12.5001),
///     ParkingSpot::new(2i64, 42.0000, 12.6000),
/// ];
///
/// let nearby = find_within_radius(&center, 200.0, &spots).unwrap();
/// assert_eq!(nearby.len(), 1);
/// assert_eq!(nearby[0].id.as_str(), "1");
/// ```
pub fn find_within_radius(
    center: &Coordinate,
    radius_m: f64,
    candidates: &[ParkingSpot],
) -> Result<Vec<ParkingSpot>> {
    ProximityFilter::default().find_within_radius(center, radius_m, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CENTER: Coordinate = Coordinate { latitude: 41.9000, longitude: 12.5000 };

    fn spot(id: i64, lat: f64, lng: f64) -> ParkingSpot {
        ParkingSpot::new(id, lat, lng)
    }

    fn scenario() -> Vec<ParkingSpot> {
        vec![spot(1, 41.9001, 12.5001), spot(2, 42.0000, 12.6000)]
    }

    #[test]
    fn test_end_to_end_scenario() {
        let result = find_within_radius(&CENTER, 200.0, &scenario()).unwrap();
        assert_eq!(result, vec![spot(1, 41.9001, 12.5001)]);
    }

    #[test]
    fn test_distances_reported() {
        let spots = scenario();
        let matches = ProximityFilter::new()
            .find_with_distances(&CENTER, 20_000.0, &spots)
            .unwrap();

        assert_eq!(matches.len(), 2);
        assert!((matches[0].distance_m - 13.9).abs() < 0.5);
        assert!((matches[1].distance_m - 13_858.0).abs() < 50.0);
    }

    #[test]
    fn test_empty_candidates() {
        assert!(find_within_radius(&CENTER, 500.0, &[]).unwrap().is_empty());
        assert!(find_within_radius(&CENTER, 0.0, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_negative_radius_rejected() {
        let err = find_within_radius(&CENTER, -1.0, &scenario()).unwrap_err();
        assert!(matches!(err, GeoError::InvalidArgument(_)));

        let err = find_within_radius(&CENTER, -1.0, &[]).unwrap_err();
        assert!(matches!(err, GeoError::InvalidArgument(_)));
    }

    #[test]
    fn test_non_finite_radius_rejected() {
        assert!(find_within_radius(&CENTER, f64::NAN, &scenario()).is_err());
        assert!(find_within_radius(&CENTER, f64::INFINITY, &scenario()).is_err());
    }

    #[test]
    fn test_invalid_center_rejected() {
        let err = find_within_radius(&Coordinate::new(0.0, 200.0), 10.0, &scenario()).unwrap_err();
        assert!(matches!(err, GeoError::InvalidCoordinate(_)));
    }

    #[test]
    fn test_zero_radius_matches_only_coincident() {
        let spots = vec![
            spot(1, 41.9000, 12.5000),
            spot(2, 41.9001, 12.5001),
            // ~0.11 m north, inside the tolerance
            spot(3, 41.900_001, 12.5000),
        ];
        let ids: Vec<_> = find_within_radius(&CENTER, 0.0, &spots)
            .unwrap()
            .into_iter()
            .map(|s| s.id.to_string())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_colocated_excluded_when_configured() {
        let spots = vec![spot(1, 41.9000, 12.5000), spot(2, 41.9001, 12.5001)];
        let filter = ProximityFilter::new().with_colocated(ColocatedPolicy::Exclude);

        let result = filter.find_within_radius(&CENTER, 200.0, &spots).unwrap();
        assert_eq!(result, vec![spot(2, 41.9001, 12.5001)]);
    }

    #[test]
    fn test_colocated_policy_parse() {
        assert_eq!("Exclude".parse::<ColocatedPolicy>(), Ok(ColocatedPolicy::Exclude));
        assert_eq!("include".parse::<ColocatedPolicy>(), Ok(ColocatedPolicy::Include));
        assert!("sometimes".parse::<ColocatedPolicy>().is_err());
    }

    #[test]
    fn test_invalid_candidate_skipped() {
        let spots = vec![spot(1, 91.0, 12.5), spot(2, 41.9001, 12.5001)];
        let result = find_within_radius(&CENTER, 200.0, &spots).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_str(), "2");
    }

    #[test]
    fn test_input_order_preserved() {
        // Farther spot listed first
        let spots = vec![spot(9, 41.9010, 12.5000), spot(4, 41.9001, 12.5000)];
        let ids: Vec<_> = find_within_radius(&CENTER, 500.0, &spots)
            .unwrap()
            .into_iter()
            .map(|s| s.id.to_string())
            .collect();
        assert_eq!(ids, vec!["9", "4"]);
    }

    #[test]
    fn test_nearest_sorted_and_truncated() {
        let spots = vec![
            spot(1, 42.0000, 12.6000),
            spot(2, 41.9001, 12.5001),
            spot(3, 41.9100, 12.5000),
        ];
        let nearest = ProximityFilter::new().nearest(&CENTER, &spots, 2).unwrap();
        let ids: Vec<_> = nearest.iter().map(|m| m.spot.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let filter = ProximityFilter::new().with_tolerance(-0.1);
        assert!(matches!(
            filter.find_within_radius(&CENTER, 10.0, &[]),
            Err(GeoError::InvalidArgument(_))
        ));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_path_matches_sequential_order() {
        let spots: Vec<_> = (0..5000)
            .map(|i| spot(i, 41.9 + (i % 100) as f64 * 0.0001, 12.5))
            .collect();
        let result = find_within_radius(&CENTER, 500.0, &spots).unwrap();
        let expected: Vec<_> = spots
            .iter()
            .filter(|s| haversine_distance_meters(&CENTER, &s.location) <= 500.5)
            .cloned()
            .collect();
        assert_eq!(result, expected);
    }

    fn candidates() -> impl Strategy<Value = Vec<ParkingSpot>> {
        prop::collection::vec((41.8f64..42.0, 12.4f64..12.6), 0..40).prop_map(|points| {
            points
                .into_iter()
                .enumerate()
                .map(|(i, (lat, lng))| spot(i as i64, lat, lng))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_monotonic_in_radius(
            spots in candidates(),
            r1 in 0.0f64..20_000.0,
            extra in 0.0f64..20_000.0,
        ) {
            let small = find_within_radius(&CENTER, r1, &spots).unwrap();
            let large = find_within_radius(&CENTER, r1 + extra, &spots).unwrap();
            for s in &small {
                prop_assert!(large.contains(s));
            }
        }

        #[test]
        fn prop_result_is_subsequence(spots in candidates(), r in 0.0f64..20_000.0) {
            let result = find_within_radius(&CENTER, r, &spots).unwrap();
            let mut remaining = spots.iter();
            for s in &result {
                prop_assert!(remaining.any(|c| c == s));
            }
        }
    }
}
