//! JSON output shapes

use serde::Serialize;
use std::time::Duration;
use tac_geo::{Coordinate, SpotId};

/// One nearby spot
#[derive(Debug, Serialize)]
pub struct JsonSpot<'a> {
    pub id: &'a SpotId,
    pub lat: f64,
    pub lng: f64,
    pub distance_m: f64,
}

/// `tac distance` result
#[derive(Debug, Serialize)]
pub struct JsonDistance {
    pub from: Coordinate,
    pub to: Coordinate,
    pub distance_m: f64,
}

/// `tac health` result
#[derive(Debug, Serialize)]
pub struct JsonHealthOutput {
    pub table: String,
    pub url: Option<String>,
    pub status: String,
    pub response_time_ms: Option<u64>,
    pub has_rows: Option<bool>,
    pub error: Option<String>,
}

pub fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
