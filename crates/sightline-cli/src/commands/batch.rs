//! Batch command implementation.
//!
//! Every subject is evaluated on the blocking pool; results are reported in
//! the order the files were given.

use super::{read, source_for};
use crate::cli::BatchArgs;
use crate::error::{CliError, Result};
use crate::output::{BatchEntry, Formatter};
use sightline_domain::EvaluationContext;
use sightline_synthesizer::{EvaluationOptions, Pipeline, PipelineConfig};
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Execute the batch command.
pub async fn execute_batch(
    args: BatchArgs,
    config: &PipelineConfig,
    formatter: &Formatter,
) -> Result<String> {
    let pipeline = Arc::new(Pipeline::new(config.clone())?);
    let options = EvaluationOptions {
        use_overlay: !args.no_overlay,
        previous_color: None,
    };

    let mut tasks = JoinSet::new();
    for (index, path) in args.files.into_iter().enumerate() {
        let pipeline = Arc::clone(&pipeline);
        let as_of = args.as_of;
        tasks.spawn(async move {
            let subject = subject_for(&path);
            let outcome = match read(&path).await {
                Ok(contents) => {
                    let source = source_for(&path, contents);
                    let ctx = EvaluationContext::new(subject.clone(), as_of);
                    tokio::task::spawn_blocking(move || {
                        pipeline
                            .evaluate_sources(&[source], &ctx, &options)
                            .map_err(|e| e.to_string())
                    })
                    .await
                    .unwrap_or_else(|e| Err(format!("Evaluation task failed: {}", e)))
                }
                Err(e) => Err(e.to_string()),
            };
            (index, subject, outcome)
        });
    }

    let mut entries = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (index, subject, outcome) = joined.map_err(|e| CliError::Task(e.to_string()))?;
        let entry = match outcome {
            Ok(document) => BatchEntry {
                subject,
                document: Some(document),
                error: None,
            },
            Err(error) => {
                warn!(subject = %subject, "{}", error);
                BatchEntry {
                    subject,
                    document: None,
                    error: Some(error),
                }
            }
        };
        entries.push((index, entry));
    }
    entries.sort_by_key(|(index, _)| *index);
    let entries: Vec<BatchEntry> = entries.into_iter().map(|(_, entry)| entry).collect();

    let failed = entries.iter().filter(|e| e.document.is_none()).count();
    info!(subjects = entries.len(), failed, "batch complete");
    if failed == entries.len() {
        return Err(CliError::InvalidInput(format!(
            "All {} subjects failed to evaluate",
            failed
        )));
    }

    formatter.format_batch(&entries)
}

fn subject_for(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_is_file_stem() {
        assert_eq!(subject_for(Path::new("/data/ACME.json")), "ACME");
        assert_eq!(subject_for(Path::new("globex.txt")), "globex");
        assert_eq!(subject_for(Path::new("initech")), "initech");
    }
}
