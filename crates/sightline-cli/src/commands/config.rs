//! Config command implementation.

use crate::cli::ConfigArgs;
use crate::config;
use crate::error::{CliError, Result};
use sightline_synthesizer::PipelineConfig;

/// Execute the config command: print a preset, or the effective
/// configuration, as TOML.
pub async fn execute_config(args: ConfigArgs, effective: &PipelineConfig) -> Result<String> {
    let selected = match args.preset {
        Some(preset) => config::preset(preset.name())?,
        None => effective.clone(),
    };
    selected.to_toml().map_err(CliError::Config)
}
