//! Nearby parking search
//!
//! Ties a [`SpotRepository`] to a [`ProximityFilter`]: each search fetches
//! a fresh snapshot and filters it around the given center.

use crate::error::SearchError;
use crate::repository::SpotRepository;
use serde::Serialize;
use tac_core::config::SearchConfig;
use tac_geo::{Coordinate, GeoError, ParkingSpot, ProximityFilter};
use tracing::{info, instrument, warn};

/// Result of a completed search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Center the search ran from
    pub center: Coordinate,
    /// Requested radius in meters
    pub radius_m: f64,
    /// Matching spots with their distance from the center
    pub spots: Vec<(ParkingSpot, f64)>,
    /// Number of candidates in the snapshot
    pub scanned: usize,
}

impl SearchOutcome {
    /// The search ran and nothing was in range
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Number of matches
    pub fn len(&self) -> usize {
        self.spots.len()
    }
}

/// Radius search over a spot repository.
#[derive(Debug, Clone)]
pub struct NearbySearch<R> {
    repository: R,
    filter: ProximityFilter,
    limit: Option<usize>,
}

impl<R: SpotRepository> NearbySearch<R> {
    /// Search with the default filter and no result limit
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            filter: ProximityFilter::default(),
            limit: None,
        }
    }

    /// Search configured from the `[search]` section
    ///
    /// # Errors
    /// [`GeoError::InvalidArgument`] for an unknown colocated policy
    pub fn from_config(repository: R, config: &SearchConfig) -> Result<Self, GeoError> {
        let filter = ProximityFilter::new()
            .with_tolerance(config.tolerance_m)
            .with_colocated(config.colocated.parse()?);
        Ok(Self::new(repository).with_filter(filter).with_limit(config.limit))
    }

    /// Replace the proximity filter
    #[must_use]
    pub fn with_filter(mut self, filter: ProximityFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Keep only the `limit` nearest matches, ordered by distance
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// The underlying repository
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Find spots within `radius_m` meters of `center`.
    ///
    /// Arguments are checked before any fetch. Matches keep snapshot order
    /// unless a limit is set, in which case the nearest come first.
    #[instrument(skip(self, center), fields(center = %center))]
    pub async fn search(
        &self,
        center: Coordinate,
        radius_m: f64,
    ) -> Result<SearchOutcome, SearchError> {
        // Reject bad arguments before fetching.
        self.filter.find_with_distances(&center, radius_m, &[])?;

        let snapshot = self.repository.fetch_all().await.map_err(|e| {
            warn!(error = %e, "Spot snapshot unavailable");
            SearchError::UpstreamFetchFailed(e)
        })?;

        let mut matches = self.filter.find_with_distances(&center, radius_m, &snapshot)?;
        if let Some(limit) = self.limit {
            matches.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
            matches.truncate(limit);
        }

        let spots: Vec<(ParkingSpot, f64)> = matches
            .into_iter()
            .map(|m| (m.spot.clone(), m.distance_m))
            .collect();

        info!(scanned = snapshot.len(), found = spots.len(), radius_m, "Nearby search complete");

        Ok(SearchOutcome {
            center,
            radius_m,
            spots,
            scanned: snapshot.len(),
        })
    }
}
