//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result, ResultExt};
use std::path::{Path, PathBuf};

/// File names searched, in order, when no path is given
const CANDIDATES: [&str; 3] = [".tac.toml", "tac.toml", ".config/tac.toml"];

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path must exist. Without one, the standard locations in
    /// the current directory are searched and defaults are used if none is
    /// present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(Path::new(".")),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        validate(&schema).context(match config_path {
            Some(ref p) => format!("In {}", p.display()),
            None => "In built-in defaults".to_string(),
        })?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

/// Find configuration file in standard locations under `dir`
fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|candidate| dir.join(candidate))
        .find(|path| path.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {}", path.display()))?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Failed to parse config file {}", path.display()))
}

fn invalid(message: String) -> Error {
    Error::new(ErrorCode::InvalidConfigValue, message)
}

/// Reject values no query could run with
fn validate(schema: &ConfigSchema) -> Result<()> {
    let search = &schema.search;
    if !search.radius_m.is_finite() || search.radius_m < 0.0 {
        return Err(invalid(format!("search.radius_m must be >= 0, got {}", search.radius_m)));
    }
    if !search.tolerance_m.is_finite() || search.tolerance_m < 0.0 {
        return Err(invalid(format!(
            "search.tolerance_m must be >= 0, got {}",
            search.tolerance_m
        )));
    }
    if !matches!(search.colocated.as_str(), "include" | "exclude") {
        return Err(invalid(format!(
            "search.colocated must be \"include\" or \"exclude\", got {:?}",
            search.colocated
        )));
    }

    let location = &schema.location;
    if !(-90.0..=90.0).contains(&location.default_latitude) {
        return Err(invalid(format!(
            "location.default_latitude {} outside [-90, 90]",
            location.default_latitude
        )));
    }
    if !(-180.0..=180.0).contains(&location.default_longitude) {
        return Err(invalid(format!(
            "location.default_longitude {} outside [-180, 180]",
            location.default_longitude
        )));
    }
    if location.timeout_secs == 0 {
        return Err(invalid("location.timeout_secs cannot be zero".to_string()));
    }

    let table = &schema.backend.table;
    if table.is_empty() || !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid(format!("backend.table {table:?} is not a valid table name")));
    }

    Ok(())
}
