//! Scoring error types

use thiserror::Error;

/// Errors that can occur while scoring
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The valuation axis cannot be evaluated from the available inputs
    #[error("Valuation unavailable: {0}")]
    ValuationUnavailable(String),
}
