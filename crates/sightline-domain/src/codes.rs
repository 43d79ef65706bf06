//! Error and warning codes shared across the pipeline

use serde::{Deserialize, Serialize};

/// Error taxonomy of the pipeline
///
/// Only structurally unusable input is fatal; every code listed here is
/// recovered locally and reported as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Excerpt longer than 25 words
    InvalidExcerptLength,
    /// No usable anchor at all
    MissingAnchor,
    /// Anchor present but malformed
    InvalidAnchorFormat,
    /// Source format cannot carry the supplied anchor form
    UnsupportedSourceFormat,
    /// Fact flagged as contradicted
    ContradictoryEvidence,
    /// Numerical consistency check failed
    NumericGuardFail,
    /// A required input could not be sourced
    InsufficientEvidence,
}

impl ErrorCode {
    /// Wire name of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidExcerptLength => "INVALID_EXCERPT_LENGTH",
            ErrorCode::MissingAnchor => "MISSING_ANCHOR",
            ErrorCode::InvalidAnchorFormat => "INVALID_ANCHOR_FORMAT",
            ErrorCode::UnsupportedSourceFormat => "UNSUPPORTED_SOURCE_FORMAT",
            ErrorCode::ContradictoryEvidence => "CONTRADICTORY_EVIDENCE",
            ErrorCode::NumericGuardFail => "NUMERIC_GUARD_FAIL",
            ErrorCode::InsufficientEvidence => "INSUFFICIENT_EVIDENCE",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a record fails validation and is excluded from scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationFailure {
    /// Excerpt longer than 25 words
    InvalidExcerptLength,
    /// No usable anchor
    MissingAnchor,
    /// Malformed anchor
    InvalidAnchorFormat,
    /// PDF-like source with a fragment anchor
    UnsupportedSourceFormat,
}

impl ValidationFailure {
    /// Corresponding taxonomy code
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationFailure::InvalidExcerptLength => ErrorCode::InvalidExcerptLength,
            ValidationFailure::MissingAnchor => ErrorCode::MissingAnchor,
            ValidationFailure::InvalidAnchorFormat => ErrorCode::InvalidAnchorFormat,
            ValidationFailure::UnsupportedSourceFormat => ErrorCode::UnsupportedSourceFormat,
        }
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code().as_str())
    }
}

/// Non-fatal findings on an accepted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationWarning {
    /// Fact is flagged as contradicted; kept for the record, never scored
    ContradictoryEvidence,
    /// Claimed tier was higher than the sourcing supports
    TierDowngraded,
}
