//! CLI command implementations.

pub mod classify;
pub mod config;
pub mod detect;
pub mod exposure;

pub use classify::ClassifyArgs;
pub use config::ConfigArgs;
pub use detect::DetectArgs;
pub use exposure::ExposureArgs;

use std::path::Path;

use serde::de::DeserializeOwned;
use wealthlens_exposure::ExposureConfig;

use crate::error::{CliError, CliResult};

fn read_file(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let text = read_file(path)?;
    serde_json::from_str(&text).map_err(|e| CliError::parse(path, e))
}

/// Loads an exposure config from TOML, or the defaults when no file is given.
///
/// Missing keys keep their default values.
pub fn load_config(path: Option<&Path>) -> CliResult<ExposureConfig> {
    let Some(path) = path else {
        return Ok(ExposureConfig::default());
    };
    let text = read_file(path)?;
    let config: ExposureConfig = toml::from_str(&text).map_err(|e| CliError::parse(path, e))?;
    tracing::debug!(path = %path.display(), "loaded exposure config");
    Ok(config)
}

/// Validates a 0-100 percentage flag.
pub fn validate_percent(value: f64, flag: &str) -> CliResult<f64> {
    if !(0.0..=100.0).contains(&value) {
        return Err(CliError::InvalidArgument(format!(
            "{flag} must be between 0 and 100, got {value}"
        )));
    }
    Ok(value)
}
