//! Configuration schema definitions
//!
//! Every section and key is optional in the file; missing values fall back
//! to the defaults below.

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Radius query settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Search radius in meters
    #[serde(default = "default_radius_m")]
    pub radius_m: f64,

    /// Slack added to the radius, in meters
    #[serde(default = "default_tolerance_m")]
    pub tolerance_m: f64,

    /// Whether spots on the center itself are reported (`include` / `exclude`)
    #[serde(default = "default_colocated")]
    pub colocated: String,

    /// Maximum number of spots to print
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_m: default_radius_m(),
            tolerance_m: default_tolerance_m(),
            colocated: default_colocated(),
            limit: None,
        }
    }
}

fn default_radius_m() -> f64 {
    200.0
}

fn default_tolerance_m() -> f64 {
    0.5
}

fn default_colocated() -> String {
    "include".to_string()
}

/// Location acquisition settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationConfig {
    /// Latitude used when no position can be acquired
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,

    /// Longitude used when no position can be acquired
    #[serde(default = "default_longitude")]
    pub default_longitude: f64,

    /// How long to wait for a position, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            default_latitude: default_latitude(),
            default_longitude: default_longitude(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// Rome
fn default_latitude() -> f64 {
    41.8992
}

fn default_longitude() -> f64 {
    12.5450
}

fn default_timeout_secs() -> u64 {
    15
}

/// Spot table settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    /// Table holding the parking spots
    #[serde(default = "default_table")]
    pub table: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            table: default_table(),
        }
    }
}

fn default_table() -> String {
    "posto".to_string()
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}
