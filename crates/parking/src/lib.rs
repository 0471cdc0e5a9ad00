//! Nearby parking search for TAC
//!
//! This crate connects the pieces around the geometric core in `tac-geo`:
//!
//! - [`location`]: where the user is, with timeout and fallback
//! - [`repository`]: where parking spots come from (Supabase, a JSON file, memory)
//! - [`search`]: a radius search over a fresh repository snapshot
//!
//! # Example
//!
//! ```rust
//! use tac_geo::{Coordinate, ParkingSpot};
//! use tac_parking::{InMemorySpotRepository, NearbySearch};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let repo = InMemorySpotRepository::new(vec![
//!     ParkingSpot::new(1i64, 41.9001, 12.5001),
//!     ParkingSpot::new(2i64, 42.0000, 12.6000),
//! ]);
//!
//! let outcome = NearbySearch::new(repo)
//!     .search(Coordinate::new(41.9000, 12.5000), 200.0)
//!     .await
//!     .unwrap();
//! assert_eq!(outcome.len(), 1);
//! # });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod location;
pub mod repository;
pub mod search;

pub use error::{LocationError, RepositoryError, SearchError};
pub use location::{
    EnvLocation, FixedLocation, LocationProvider, LocationResolver, LocationSource,
    ResolvedLocation,
};
pub use repository::{
    InMemorySpotRepository, JsonFileSpotRepository, SpotRepository, SupabaseSpotRepository,
};
pub use search::{NearbySearch, SearchOutcome};
