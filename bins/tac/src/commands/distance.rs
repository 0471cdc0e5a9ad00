//! Point-to-point distance command

use crate::commands::geo_error;
use crate::types::JsonDistance;
use anyhow::Result;
use tac_cli::output::format_distance;
use tac_cli::OutputFormat;
use tac_geo::Coordinate;

/// Print the great-circle distance between two `(lat, lng)` points
pub fn run(from: (f64, f64), to: (f64, f64), format: OutputFormat) -> Result<()> {
    let from = Coordinate::from(from);
    let to = Coordinate::from(to);
    let distance_m = tac_geo::distance(&from, &to).map_err(geo_error)?;

    if format.is_json() {
        let output = JsonDistance {
            from,
            to,
            distance_m,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{distance_m:.1} m ({})", format_distance(distance_m));
    }
    Ok(())
}
