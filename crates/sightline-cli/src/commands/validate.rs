//! Validate command implementation.

use super::read_sources;
use crate::cli::ValidateArgs;
use crate::error::Result;
use crate::output::Formatter;
use sightline_synthesizer::{Pipeline, PipelineConfig};
use tracing::info;

/// Execute the validate command.
pub async fn execute_validate(
    args: ValidateArgs,
    config: &PipelineConfig,
    formatter: &Formatter,
) -> Result<String> {
    let pipeline = Pipeline::new(config.clone())?;
    let sources = read_sources(&args.evidence).await?;

    let extraction = pipeline.extract(&sources)?;
    let mut batch = pipeline.validate(&extraction.candidates);
    batch.report.record_unparsed(&extraction.skipped);
    info!("{}", batch.report.summary());

    formatter.format_report(&batch.report)
}
