//! CLI command implementations

pub mod distance;
pub mod health;
pub mod nearby;
pub mod spots;

use anyhow::Result;
use owo_colors::OwoColorize;
use std::process::ExitCode;
use tac_api_client::{ApiError, TacClient};
use tac_cli::OutputFormat;
use tac_core::{Error as CoreError, ErrorCode};
use tac_geo::GeoError;

/// Client for the configured Supabase project
pub fn backend_client() -> Result<TacClient> {
    TacClient::new().map_err(|e| {
        let error = match &e {
            ApiError::MissingEnvVar(_) | ApiError::Config(_) => CoreError::config(e.to_string())
                .with_suggestion("Set SUPABASE_URL and SUPABASE_ANON_KEY, or pass --spots-file"),
            _ => CoreError::upstream(e.to_string()),
        };
        error.with_source(e).into()
    })
}

/// Coded error for a rejected coordinate or radius
pub fn geo_error(err: GeoError) -> CoreError {
    let code = match err {
        GeoError::InvalidArgument(_) => ErrorCode::InvalidArgument,
        GeoError::InvalidCoordinate(_) => ErrorCode::InvalidCoordinate,
    };
    CoreError::new(code, err.to_string()).with_source(err)
}

/// Print an error and pick the process exit code
pub fn report(err: &anyhow::Error, format: OutputFormat) -> ExitCode {
    let Some(coded) = err.downcast_ref::<CoreError>() else {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        return ExitCode::FAILURE;
    };

    if format.is_json() {
        if let Ok(json) = serde_json::to_string_pretty(&coded.to_report()) {
            eprintln!("{json}");
        }
    } else {
        eprintln!("{} {}", "Error:".red().bold(), coded.message);
        if let Some(context) = &coded.context {
            eprintln!("  {} {}", "context:".dimmed(), context);
        }
        if let Some(suggestion) = &coded.suggestion {
            eprintln!("  {} {}", "hint:".dimmed(), suggestion);
        }
    }

    ExitCode::from(u8::try_from(coded.exit_code()).unwrap_or(1))
}
