//! Spot listing command

use crate::commands::backend_client;
use anyhow::Result;
use std::path::PathBuf;
use tac_cli::output::format_count;
use tac_cli::{progress, OutputFormat, Status};
use tac_core::config::Config;
use tac_core::Error as CoreError;
use tac_geo::ParkingSpot;
use tac_parking::{JsonFileSpotRepository, SpotRepository, SupabaseSpotRepository};

/// Print the current spot snapshot
pub async fn run(spots_file: Option<PathBuf>, config: &Config, format: OutputFormat) -> Result<()> {
    let spinner = progress::spinner_for(format, "Fetching parking spots...");
    let fetched = match spots_file {
        Some(path) => JsonFileSpotRepository::new(path).fetch_all().await,
        None => {
            let client = backend_client()?;
            SupabaseSpotRepository::new(&client, &config.schema.backend.table)
                .fetch_all()
                .await
        }
    };
    match &fetched {
        Ok(_) => progress::finish_clear(&spinner),
        Err(_) => progress::finish_error(&spinner, "Could not fetch parking spots"),
    }
    let spots = fetched.map_err(CoreError::from)?;

    if format.is_json() {
        // Same row shape the backend serves, so the output works as --spots-file input.
        println!("{}", serde_json::to_string_pretty(&spots)?);
    } else {
        print_text(&spots);
    }
    Ok(())
}

fn print_text(spots: &[ParkingSpot]) {
    if spots.is_empty() {
        Status::warning("No parking spots known");
        return;
    }

    Status::header(&format!("Parking spots ({})", spots.len()));
    for spot in spots {
        println!("{:>8}  {}", spot.id, spot.location);
    }
    println!();
    Status::success(&format_count(spots.len(), "spot", "spots"));
}
