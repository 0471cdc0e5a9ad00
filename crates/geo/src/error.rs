//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during distance and radius queries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// A query argument is outside its accepted domain (e.g. negative radius)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Latitude or longitude out of range, or not finite
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

impl GeoError {
    pub(crate) fn argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidArgument(_) => GeoErrorCode::InvalidArgument,
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
        }
    }
}

/// Error code for integration with tac-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid query argument
    InvalidArgument = 10001,
    /// Invalid coordinate values
    InvalidCoordinate = 10002,
}
