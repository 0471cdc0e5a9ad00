//! Nearby parking search command

use crate::commands::{backend_client, geo_error};
use crate::types::JsonSpot;
use anyhow::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tac_cli::output::{format_count, format_distance, spot_line};
use tac_cli::{progress, OutputFormat, Status};
use tac_core::config::{Config, SearchConfig};
use tac_core::Error as CoreError;
use tac_geo::Coordinate;
use tac_parking::{
    EnvLocation, JsonFileSpotRepository, LocationResolver, NearbySearch, SearchOutcome,
    SpotRepository, SupabaseSpotRepository,
};
use tac_telemetry::{metrics, Timer};

/// Arguments for `tac nearby`
pub struct NearbyArgs {
    /// Explicit center, skipping location lookup
    pub center: Option<(f64, f64)>,
    pub radius: Option<f64>,
    pub spots_file: Option<PathBuf>,
    pub limit: Option<usize>,
}

/// Run a nearby search and print the matches
pub async fn run(args: NearbyArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let search_config = SearchConfig {
        radius_m: args.radius.unwrap_or(config.schema.search.radius_m),
        limit: args.limit.or(config.schema.search.limit),
        ..config.schema.search.clone()
    };

    let center = match args.center {
        Some((lat, lng)) => Coordinate::new(lat, lng),
        None => {
            let resolver =
                LocationResolver::from_config(EnvLocation::new(), &config.schema.location);
            let resolved = resolver.resolve().await;
            if resolved.is_fallback() && !format.is_json() {
                Status::warning(&format!(
                    "Location unavailable, searching around {}",
                    resolved.coordinate
                ));
            }
            resolved.coordinate
        }
    };

    let outcome = match args.spots_file {
        Some(path) => {
            let repo = JsonFileSpotRepository::new(path);
            search(repo, &search_config, center, format).await?
        }
        None => {
            let client = backend_client()?;
            let repo = SupabaseSpotRepository::new(&client, &config.schema.backend.table);
            search(repo, &search_config, center, format).await?
        }
    };

    if format.is_json() {
        print_json(&outcome)
    } else {
        print_text(&outcome);
        Ok(())
    }
}

async fn search<R: SpotRepository>(
    repository: R,
    config: &SearchConfig,
    center: Coordinate,
    format: OutputFormat,
) -> Result<SearchOutcome> {
    let nearby = NearbySearch::from_config(repository, config).map_err(geo_error)?;

    let spinner = progress::spinner_for(format, "Searching for parking...");
    let timer = Timer::start("search_ms");
    let result = nearby.search(center, config.radius_m).await;
    timer.stop();
    match &result {
        Ok(_) => progress::finish_clear(&spinner),
        Err(_) => progress::finish_error(&spinner, "Search failed"),
    }

    metrics().increment("searches");
    let outcome = result.map_err(CoreError::from)?;
    metrics().increment_by("spots_scanned", outcome.scanned as u64);
    Ok(outcome)
}

fn print_json(outcome: &SearchOutcome) -> Result<()> {
    let spots: Vec<JsonSpot<'_>> = outcome
        .spots
        .iter()
        .map(|(spot, distance_m)| JsonSpot {
            id: &spot.id,
            lat: spot.location.latitude,
            lng: spot.location.longitude,
            distance_m: *distance_m,
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&spots)?);
    Ok(())
}

fn print_text(outcome: &SearchOutcome) {
    if outcome.is_empty() {
        println!("{}", "No parking spots found".yellow());
        println!(
            "{}",
            format!(
                "  {} checked within {} of {}",
                format_count(outcome.scanned, "spot", "spots"),
                format_distance(outcome.radius_m),
                outcome.center
            )
            .dimmed()
        );
        return;
    }

    Status::header(&format!(
        "Parking within {} of {}",
        format_distance(outcome.radius_m),
        outcome.center
    ));
    for (spot, distance_m) in &outcome.spots {
        println!(
            "{}",
            spot_line(
                spot.id.as_str(),
                spot.location.latitude,
                spot.location.longitude,
                *distance_m
            )
        );
    }
    println!();
    Status::success(&format!(
        "{} found ({} scanned)",
        format_count(outcome.len(), "spot", "spots"),
        outcome.scanned
    ));
}
