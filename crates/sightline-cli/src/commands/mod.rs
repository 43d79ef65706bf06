//! Command implementations.
//!
//! Each command returns its rendered output; printing is left to the caller.

pub mod batch;
pub mod config;
pub mod evaluate;
pub mod validate;

pub use self::batch::execute_batch;
pub use self::config::execute_config;
pub use self::evaluate::execute_evaluate;
pub use self::validate::execute_validate;

use crate::cli::EvidenceArgs;
use crate::error::{CliError, Result};
use sightline_extractor::EvidenceSource;
use std::path::Path;

/// Source kind for a file: `.json` is an evidence store, anything else is
/// line-oriented records.
pub(crate) fn source_for(path: &Path, contents: String) -> EvidenceSource {
    let is_store = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_store {
        EvidenceSource::Store(contents)
    } else {
        EvidenceSource::Records(contents)
    }
}

/// Read the evidence files named on the command line.
pub(crate) async fn read_sources(args: &EvidenceArgs) -> Result<Vec<EvidenceSource>> {
    let mut sources = Vec::new();
    if let Some(path) = &args.evidence {
        sources.push(EvidenceSource::Records(read(path).await?));
    }
    if let Some(path) = &args.store {
        sources.push(EvidenceSource::Store(read(path).await?));
    }
    if sources.is_empty() {
        return Err(CliError::InvalidInput(
            "At least one of --evidence or --store is required".to_string(),
        ));
    }
    Ok(sources)
}

pub(crate) async fn read(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        CliError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_source_kind_from_extension() {
        assert!(matches!(
            source_for(Path::new("acme.json"), String::new()),
            EvidenceSource::Store(_)
        ));
        assert!(matches!(
            source_for(Path::new("acme.JSON"), String::new()),
            EvidenceSource::Store(_)
        ));
        assert!(matches!(
            source_for(Path::new("acme.txt"), String::new()),
            EvidenceSource::Records(_)
        ));
        assert!(matches!(
            source_for(Path::new("acme"), String::new()),
            EvidenceSource::Records(_)
        ));
    }

    #[tokio::test]
    async fn test_read_sources_requires_one() {
        let args = EvidenceArgs {
            evidence: None,
            store: None,
        };
        assert!(matches!(
            read_sources(&args).await,
            Err(CliError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file_named_in_error() {
        let args = EvidenceArgs {
            evidence: Some(PathBuf::from("/nonexistent/acme.txt")),
            store: None,
        };
        let err = read_sources(&args).await.unwrap_err();
        assert!(err.to_string().contains("acme.txt"));
    }
}
