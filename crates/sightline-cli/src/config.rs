//! Pipeline configuration loading for the CLI.

use crate::error::{CliError, Result};
use sightline_synthesizer::PipelineConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default configuration file: `~/.sightline/config.toml`.
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".sightline").join("config.toml"))
}

/// Load the pipeline configuration.
///
/// An explicit path must exist. Without one, the default file is used when
/// present; otherwise built-in defaults apply.
pub fn load(explicit: Option<&Path>) -> Result<PipelineConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_path().filter(|p| p.exists()) {
            Some(path) => path,
            None => {
                debug!("No configuration file, using defaults");
                return Ok(PipelineConfig::default());
            }
        },
    };

    let contents = fs::read_to_string(&path).map_err(|e| {
        CliError::Config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    let config = PipelineConfig::from_toml(&contents)
        .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;
    config
        .validate()
        .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;

    debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Named preset as a configuration.
pub fn preset(name: &str) -> Result<PipelineConfig> {
    PipelineConfig::preset(name).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "Unknown preset '{}' (expected one of: {})",
            name,
            PipelineConfig::PRESETS.join(", ")
        ))
    })
}
