//! Evaluate command implementation.

use super::read_sources;
use crate::cli::EvaluateArgs;
use crate::error::Result;
use crate::output::Formatter;
use sightline_domain::EvaluationContext;
use sightline_synthesizer::{EvaluationOptions, Pipeline, PipelineConfig};

/// Execute the evaluate command.
pub async fn execute_evaluate(
    args: EvaluateArgs,
    config: &PipelineConfig,
    formatter: &Formatter,
) -> Result<String> {
    let pipeline = Pipeline::new(config.clone())?;
    let sources = read_sources(&args.evidence).await?;

    let ctx = EvaluationContext::new(args.subject, args.as_of);
    let options = EvaluationOptions {
        use_overlay: !args.no_overlay,
        previous_color: args.previous_color.map(Into::into),
    };
    let doc = pipeline.evaluate_sources(&sources, &ctx, &options)?;

    formatter.format_document(&doc)
}
