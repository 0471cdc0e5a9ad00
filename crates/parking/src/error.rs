//! Error types for location, repository, and search operations

use tac_api_client::ApiError;
use tac_core::{Error as CoreError, ErrorCode};
use tac_geo::GeoError;
use thiserror::Error;

/// Why a position could not be acquired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user or platform refused location access
    #[error("Location permission denied")]
    PermissionDenied,

    /// No position source could produce a fix
    #[error("Location unavailable: {0}")]
    Unavailable(String),

    /// The provider did not answer in time
    #[error("Timed out waiting for a location fix")]
    Timeout,
}

/// Failure to produce a spot snapshot.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Backend request failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Local spot file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that was read
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Local spot file is not a JSON array of spot rows
    #[error("Malformed spot data in {path}: {source}")]
    Parse {
        /// File that was parsed
        path: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Failure of a nearby search.
///
/// A search that ran and found nothing is not an error; see
/// [`SearchOutcome::is_empty`](crate::SearchOutcome::is_empty).
#[derive(Debug, Error)]
pub enum SearchError {
    /// Radius rejected by the query
    #[error("{0}")]
    InvalidArgument(#[source] GeoError),

    /// Center outside the valid latitude/longitude range
    #[error("{0}")]
    InvalidCoordinate(#[source] GeoError),

    /// The spot repository could not deliver a snapshot
    #[error("search failed: {0}")]
    UpstreamFetchFailed(#[source] RepositoryError),
}

impl From<GeoError> for SearchError {
    fn from(err: GeoError) -> Self {
        match err {
            GeoError::InvalidArgument(_) => Self::InvalidArgument(err),
            GeoError::InvalidCoordinate(_) => Self::InvalidCoordinate(err),
        }
    }
}

impl From<SearchError> for CoreError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidArgument(geo) => {
                CoreError::new(ErrorCode::InvalidArgument, geo.to_string()).with_source(geo)
            }
            SearchError::InvalidCoordinate(geo) => {
                CoreError::new(ErrorCode::InvalidCoordinate, geo.to_string()).with_source(geo)
            }
            SearchError::UpstreamFetchFailed(source) => {
                CoreError::upstream(format!("search failed: {source}")).with_source(source)
            }
        }
    }
}

impl From<RepositoryError> for CoreError {
    fn from(err: RepositoryError) -> Self {
        let code = match err {
            RepositoryError::Parse { .. } => ErrorCode::MalformedSpotData,
            RepositoryError::Io { .. } => ErrorCode::IoError,
            RepositoryError::Api(_) => ErrorCode::UpstreamFetchFailed,
        };
        CoreError::new(code, err.to_string()).with_source(err)
    }
}

impl From<LocationError> for CoreError {
    fn from(err: LocationError) -> Self {
        let code = match err {
            LocationError::PermissionDenied => ErrorCode::LocationPermissionDenied,
            LocationError::Unavailable(_) => ErrorCode::LocationUnavailable,
            LocationError::Timeout => ErrorCode::LocationTimeout,
        };
        CoreError::new(code, err.to_string()).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_error_codes() {
        let err: CoreError = SearchError::from(GeoError::InvalidArgument("r".into())).into();
        assert_eq!(err.code, ErrorCode::InvalidArgument);

        let err = SearchError::from(GeoError::InvalidCoordinate("lat".into()));
        assert!(matches!(err, SearchError::InvalidCoordinate(_)));
        assert_eq!(CoreError::from(err).code, ErrorCode::InvalidCoordinate);

        let err: CoreError =
            SearchError::UpstreamFetchFailed(RepositoryError::Api(ApiError::CircuitOpen)).into();
        assert_eq!(err.code, ErrorCode::UpstreamFetchFailed);
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_location_error_codes() {
        let err: CoreError = LocationError::Timeout.into();
        assert_eq!(err.code, ErrorCode::LocationTimeout);
    }
}
