//! tac - find parking near you
//!
//! Searches a parking spot table (Supabase, or a local JSON file) for spots
//! within a radius of your position.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tac_cli::OutputFormat;
use tac_core::config::Config;
use tac_telemetry::TelemetryConfig;

mod commands;
mod types;

use commands::{distance, health, nearby, spots};

/// Find parking spots near a location
#[derive(Parser)]
#[command(name = "tac")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Configuration file (defaults to .tac.toml in the current directory)
    #[arg(short, long, global = true, env = "TAC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find parking spots within a radius
    #[command(allow_negative_numbers = true)]
    Nearby {
        /// Latitude of the search center (uses TAC_LOCATION or the default if omitted)
        #[arg(long, requires = "lng")]
        lat: Option<f64>,

        /// Longitude of the search center
        #[arg(long, requires = "lat")]
        lng: Option<f64>,

        /// Search radius in meters
        #[arg(short, long)]
        radius: Option<f64>,

        /// Read spots from a JSON file instead of the backend
        #[arg(long)]
        spots_file: Option<PathBuf>,

        /// Show only the N nearest spots
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Great-circle distance between two points, in meters
    #[command(allow_negative_numbers = true)]
    Distance {
        /// Latitude of the first point
        lat1: f64,
        /// Longitude of the first point
        lng1: f64,
        /// Latitude of the second point
        lat2: f64,
        /// Longitude of the second point
        lng2: f64,
    },

    /// List every known parking spot
    Spots {
        /// Read spots from a JSON file instead of the backend
        #[arg(long)]
        spots_file: Option<PathBuf>,
    },

    /// Check that the spot table is reachable
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return commands::report(&anyhow::Error::from(e), cli.format),
    };

    let mut telemetry = TelemetryConfig::from(&config.schema.logging);
    if cli.verbose {
        telemetry = telemetry.verbose();
    }
    if let Err(e) = tac_telemetry::init_with_config(telemetry) {
        eprintln!("{} {}", "warning:".yellow().bold(), e);
    }

    let result = match cli.command {
        Commands::Nearby {
            lat,
            lng,
            radius,
            spots_file,
            limit,
        } => {
            let args = nearby::NearbyArgs {
                center: lat.zip(lng),
                radius,
                spots_file,
                limit,
            };
            nearby::run(args, &config, cli.format).await
        }

        Commands::Distance {
            lat1,
            lng1,
            lat2,
            lng2,
        } => distance::run((lat1, lng1), (lat2, lng2), cli.format),

        Commands::Spots { spots_file } => spots::run(spots_file, &config, cli.format).await,

        Commands::Health => health::run(&config, cli.format).await,
    };

    tracing::debug!(metrics = %tac_telemetry::metrics().export_json(), "Run complete");

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => commands::report(&e, cli.format),
    }
}
