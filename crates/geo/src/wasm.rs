//! WASM bindings for the geo crate.
//!
//! Lets a browser map (Leaflet click handler and the like) run the radius
//! query locally instead of carrying its own copy of the distance formula.
//! Spots are exchanged as JSON arrays of `{id, lat, lon}` rows.

use crate::{
    distance as checked_distance, spots_from_rows, Coordinate, ParkingSpot, ProximityFilter,
};
use wasm_bindgen::prelude::*;

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{context}: {err}"))
}

fn parse_spots(spots_json: &str) -> Result<Vec<ParkingSpot>, JsValue> {
    let rows: Vec<serde_json::Value> =
        serde_json::from_str(spots_json).map_err(|e| js_error("JSON parse error", e))?;
    Ok(spots_from_rows(rows))
}

/// Distance in meters between two points.
#[wasm_bindgen]
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> Result<f64, JsValue> {
    checked_distance(&Coordinate::new(lat1, lng1), &Coordinate::new(lat2, lng2))
        .map_err(|e| js_error("Invalid input", e))
}

/// Spots within `radius_m` of the clicked point.
///
/// # Arguments
/// * `lat` - Clicked latitude
/// * `lng` - Clicked longitude
/// * `radius_m` - Search radius in meters
/// * `spots_json` - JSON array of `{id, lat, lon}` rows
///
/// # Returns
/// JSON array of the matching rows, in input order
#[wasm_bindgen]
pub fn find_spots_within_radius(
    lat: f64,
    lng: f64,
    radius_m: f64,
    spots_json: &str,
) -> Result<String, JsValue> {
    let spots = parse_spots(spots_json)?;

    let found = ProximityFilter::default()
        .find_within_radius(&Coordinate::new(lat, lng), radius_m, &spots)
        .map_err(|e| js_error("Invalid input", e))?;

    serde_json::to_string(&found).map_err(|e| js_error("JSON serialize error", e))
}

/// Up to `max_results` spots ordered by distance, each with `distance_m`.
///
/// # Returns
/// JSON array of `{spot, distance_m}` objects
#[wasm_bindgen]
pub fn nearest_spots(
    lat: f64,
    lng: f64,
    spots_json: &str,
    max_results: u32,
) -> Result<String, JsValue> {
    let spots = parse_spots(spots_json)?;

    let ranked = ProximityFilter::default()
        .nearest(&Coordinate::new(lat, lng), &spots, max_results as usize)
        .map_err(|e| js_error("Invalid input", e))?;

    serde_json::to_string(&ranked).map_err(|e| js_error("JSON serialize error", e))
}
