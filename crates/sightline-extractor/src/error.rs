//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while parsing an evidence source
///
/// These are the only fatal conditions of a run: an evidence source that
/// yields no usable record at all.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Source contained no evidence records
    #[error("Evidence source is empty")]
    Empty,

    /// No record could be parsed; carries the first offending line
    #[error("Malformed evidence record at line {line}: {reason}")]
    Malformed {
        /// 1-based line number
        line: usize,
        /// Description of the problem
        reason: String,
    },

    /// Evidence store entry could not be interpreted
    #[error("Invalid entry {index} in bucket {bucket}: {reason}")]
    InvalidEntry {
        /// Bucket name
        bucket: String,
        /// 0-based index within the bucket
        index: usize,
        /// Description of the problem
        reason: String,
    },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
