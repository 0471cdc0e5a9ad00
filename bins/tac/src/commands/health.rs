//! Backend health check command

use crate::commands::backend_client;
use crate::types::{millis, JsonHealthOutput};
use anyhow::Result;
use owo_colors::OwoColorize;
use tac_cli::output::format_duration;
use tac_cli::{progress, OutputFormat};
use tac_core::config::Config;
use tac_core::Error as CoreError;

/// Probe the spot table and report reachability
pub async fn run(config: &Config, format: OutputFormat) -> Result<()> {
    let client = backend_client()?;
    let table = &config.schema.backend.table;

    let spinner = progress::spinner_for(format, "Checking backend...");
    let probe = client.spots(table.as_str()).ping().await;
    match &probe {
        Ok(_) => progress::finish_clear(&spinner),
        Err(_) => progress::finish_error(&spinner, "Backend unreachable"),
    }

    if format.is_json() {
        let output = match &probe {
            Ok(status) => JsonHealthOutput {
                table: table.clone(),
                url: Some(status.url.clone()),
                status: "healthy".to_string(),
                response_time_ms: Some(millis(status.response_time)),
                has_rows: Some(status.has_rows),
                error: None,
            },
            Err(e) => JsonHealthOutput {
                table: table.clone(),
                url: None,
                status: "unhealthy".to_string(),
                response_time_ms: None,
                has_rows: None,
                error: Some(e.to_string()),
            },
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!();
        print!("  {table}: ");
        match &probe {
            Ok(status) => {
                let rows = if status.has_rows { "rows present" } else { "empty" };
                println!(
                    "{} {}",
                    "✓ OK".green(),
                    format!("({}, {rows})", format_duration(status.response_time)).dimmed()
                );
                println!("    └─ {}", status.url.dimmed());
            }
            Err(_) => println!("{}", "✗ Error".red()),
        }
        println!();
    }

    match probe {
        Ok(_) => Ok(()),
        Err(e) => Err(CoreError::upstream(format!("health check failed: {e}"))
            .with_source(e)
            .into()),
    }
}
