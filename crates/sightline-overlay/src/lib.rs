//! Sightline Confidence Overlay
//!
//! Optional second pass that lets fresh, short-lived SECONDARY evidence nudge
//! axis scores within tight bounds.
//!
//! # Overview
//!
//! The overlay is responsible for:
//! - **Admission**: only SECONDARY, uncontradicted facts with enough credence
//!   and a short remaining validity window take part
//! - **Bounded adjustment**: the net direction of admitted facts per axis maps
//!   to at most two stars and ten confidence points
//! - **Metrics**: admitted facts per axis and rejections per reason
//!
//! ## Admission windows
//!
//! | Anchor status | Remaining TTL admitted |
//! |---------------|------------------------|
//! | Confirmed / single-sourced | 0..=14 days |
//! | Pending | 0..=7 days |
//!
//! Adjustments are always recomputed from each score's base values, so the
//! pass is idempotent and never compounds.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use sightline_overlay::{ConfidenceOverlay, OverlayConfig};
//!
//! let overlay = ConfidenceOverlay::try_new(OverlayConfig::conservative()).unwrap();
//! assert_eq!(overlay.delta_for(1), (1, 5));
//! assert_eq!(overlay.delta_for(-3), (-2, -10));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metrics;
mod overlay;

pub use config::OverlayConfig;
pub use error::OverlayError;
pub use metrics::{AdmissionRejection, OverlayMetrics};
pub use overlay::{ConfidenceOverlay, OverlayOutcome};
