//! Where the user is
//!
//! A [`LocationProvider`] produces the search center. [`LocationResolver`]
//! bounds it with a timeout and substitutes the configured default
//! coordinate whenever no fix is available, so a search always has a
//! center to run from.

use crate::error::LocationError;
use std::future::Future;
use std::time::Duration;
use tac_core::config::LocationConfig;
use tac_geo::Coordinate;
use tracing::{debug, warn};

/// Environment variable read by [`EnvLocation`]
pub const LOCATION_ENV_VAR: &str = "TAC_LOCATION";

/// Source of the current position.
pub trait LocationProvider: Send + Sync {
    /// Acquire a single position fix
    fn current_location(&self) -> impl Future<Output = Result<Coordinate, LocationError>> + Send;
}

/// Always answers with the same coordinate.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

impl LocationProvider for FixedLocation {
    async fn current_location(&self) -> Result<Coordinate, LocationError> {
        self.0
            .validate()
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;
        Ok(self.0)
    }
}

/// Reads `"lat,lng"` from an environment variable.
///
/// The literal value `denied` reports [`LocationError::PermissionDenied`].
#[derive(Debug, Clone)]
pub struct EnvLocation {
    var: String,
}

impl Default for EnvLocation {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvLocation {
    /// Provider reading [`LOCATION_ENV_VAR`]
    pub fn new() -> Self {
        Self::with_var(LOCATION_ENV_VAR)
    }

    /// Provider reading a custom variable
    pub fn with_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl LocationProvider for EnvLocation {
    async fn current_location(&self) -> Result<Coordinate, LocationError> {
        match std::env::var(&self.var) {
            Ok(value) => parse_location(&value),
            Err(_) => Err(LocationError::Unavailable(format!("{} is not set", self.var))),
        }
    }
}

/// Parse a `"lat,lng"` pair.
pub fn parse_location(value: &str) -> Result<Coordinate, LocationError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("denied") {
        return Err(LocationError::PermissionDenied);
    }

    let malformed = || LocationError::Unavailable(format!("expected \"lat,lng\", got {value:?}"));
    let (lat, lng) = value.split_once(',').ok_or_else(malformed)?;
    let lat: f64 = lat.trim().parse().map_err(|_| malformed())?;
    let lng: f64 = lng.trim().parse().map_err(|_| malformed())?;

    Coordinate::try_new(lat, lng).map_err(|e| LocationError::Unavailable(e.to_string()))
}

/// Where a resolved center came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationSource {
    /// The provider produced a fix
    Provider,
    /// The provider failed; the default coordinate was used
    Fallback(LocationError),
}

/// Result of [`LocationResolver::resolve`]
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    /// Center to search from
    pub coordinate: Coordinate,
    /// How it was obtained
    pub source: LocationSource,
}

impl ResolvedLocation {
    /// Whether the default coordinate stands in for a real fix
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, LocationSource::Fallback(_))
    }
}

/// Provider with a timeout and a fallback coordinate.
#[derive(Debug, Clone)]
pub struct LocationResolver<P> {
    provider: P,
    timeout: Duration,
    fallback: Coordinate,
}

impl<P: LocationProvider> LocationResolver<P> {
    /// Default time allowed for a position fix
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

    /// Default fallback: central Rome
    pub const DEFAULT_FALLBACK: Coordinate = Coordinate::new(41.8992, 12.5450);

    /// Resolver with the default timeout and fallback
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            timeout: Self::DEFAULT_TIMEOUT,
            fallback: Self::DEFAULT_FALLBACK,
        }
    }

    /// Resolver configured from the `[location]` section
    pub fn from_config(provider: P, config: &LocationConfig) -> Self {
        Self::new(provider)
            .with_timeout(Duration::from_secs(config.timeout_secs))
            .with_fallback(Coordinate::new(config.default_latitude, config.default_longitude))
    }

    /// Set the fix timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the fallback coordinate
    #[must_use]
    pub fn with_fallback(mut self, fallback: Coordinate) -> Self {
        self.fallback = fallback;
        self
    }

    /// Current position, or the fallback when none can be had
    pub async fn resolve(&self) -> ResolvedLocation {
        let attempt = tokio::time::timeout(self.timeout, self.provider.current_location()).await;
        let error = match attempt {
            Ok(Ok(coordinate)) => {
                debug!(%coordinate, "Location fix acquired");
                return ResolvedLocation {
                    coordinate,
                    source: LocationSource::Provider,
                };
            }
            Ok(Err(e)) => e,
            Err(_) => LocationError::Timeout,
        };

        warn!(error = %error, fallback = %self.fallback, "Using default location");
        ResolvedLocation {
            coordinate: self.fallback,
            source: LocationSource::Fallback(error),
        }
    }
}
