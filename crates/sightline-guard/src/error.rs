//! Error types for the numerical consistency guard

use thiserror::Error;

/// Errors that can occur while building the guard
#[derive(Error, Debug)]
pub enum GuardError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
