//! Error types for the synthesizer and pipeline

use sightline_extractor::ExtractorError;
use thiserror::Error;

/// Errors that abort an evaluation run
///
/// Everything short of these is reported inside the decision document.
#[derive(Error, Debug)]
pub enum SynthesizerError {
    /// No evidence candidates were supplied
    #[error("No evidence to evaluate")]
    EmptyEvidence,

    /// An evidence source could not be parsed
    #[error("Evidence source error: {0}")]
    Extractor(#[from] ExtractorError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
