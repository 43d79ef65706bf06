//! Error types for the confidence overlay

use thiserror::Error;

/// Errors that can occur while building the overlay
#[derive(Error, Debug)]
pub enum OverlayError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
