//! Parking spot records.
//!
//! Spots travel over the wire as flat rows, the same shape the `posto` table
//! stores them in:
//!
//! ```json
//! {"id": 17, "lat": 41.9001, "lon": 12.5001}
//! ```
//!
//! `lng` is accepted as an alias of `lon`. Identifiers may be numbers or
//! strings; both are kept in their textual form. A snapshot is read with
//! [`spots_from_rows`], which drops rows without a usable position.

use crate::Coordinate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Opaque, unique identifier of a parking spot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpotId(String);

impl SpotId {
    /// Creates an identifier from its textual form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<i64> for SpotId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for SpotId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Uint(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for SpotId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => Self(n.to_string()),
            RawId::Uint(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

impl Serialize for SpotId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Numeric ids go back out as numbers so rows round-trip unchanged.
        if let Ok(n) = self.0.parse::<i64>() {
            if n.to_string() == self.0 {
                return serializer.serialize_i64(n);
            }
        }
        match self.0.parse::<u64>() {
            Ok(n) if n.to_string() == self.0 => serializer.serialize_u64(n),
            _ => serializer.serialize_str(&self.0),
        }
    }
}

/// A known parking spot.
///
/// Owned by whatever repository produced it; queries only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SpotRow", into = "SpotRow")]
pub struct ParkingSpot {
    /// Spot identifier
    pub id: SpotId,
    /// Where the spot is
    pub location: Coordinate,
}

impl ParkingSpot {
    /// Creates a new parking spot.
    pub fn new(id: impl Into<SpotId>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            location: Coordinate::new(latitude, longitude),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct SpotRow {
    id: SpotId,
    lat: f64,
    #[serde(alias = "lng")]
    lon: f64,
}

impl From<SpotRow> for ParkingSpot {
    fn from(row: SpotRow) -> Self {
        Self {
            id: row.id,
            location: Coordinate::new(row.lat, row.lon),
        }
    }
}

impl From<ParkingSpot> for SpotRow {
    fn from(spot: ParkingSpot) -> Self {
        Self {
            id: spot.id,
            lat: spot.location.latitude,
            lon: spot.location.longitude,
        }
    }
}

/// Converts snapshot rows into spots, skipping rows that do not parse.
///
/// A row with a null, missing or non-numeric `lat`/`lon` can never match a
/// radius query, so it is left out instead of failing the whole snapshot.
pub fn spots_from_rows(rows: Vec<Value>) -> Vec<ParkingSpot> {
    let total = rows.len();
    let spots: Vec<ParkingSpot> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match ParkingSpot::deserialize(&row) {
            Ok(spot) => Some(spot),
            Err(e) => {
                debug!(index, row = %row, error = %e, "Skipping unusable spot row");
                None
            }
        })
        .collect();
    if spots.len() < total {
        debug!(skipped = total - spots.len(), total, "Dropped spot rows without a position");
    }
    spots
}
