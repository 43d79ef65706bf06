//! Sightline Numerical Consistency Guard
//!
//! Cross-checks the raw numbers behind a run and flags inconsistencies.
//!
//! Checks:
//! - `MARGIN_DEVIATION`: reported vs guided gross margin
//! - `GROSS_PROFIT_RECONCILIATION`: revenue x gross margin vs reported gross profit
//! - `OPEX_GRID_MEDIAN`: median of a revenue x opex-ratio scenario grid vs actual opex
//!
//! Each check has a core tolerance and a relaxed one used when the confidence
//! overlay contributed. A failing check produces a message and a confidence
//! penalty; it never aborts the run.
//!
//! # Example
//!
//! ```
//! use sightline_guard::{GuardInputs, NumericGuard, TolerancePreset};
//!
//! let guard = NumericGuard::default_config();
//! let inputs = GuardInputs {
//!     gross_margin_pct: Some(42.0),
//!     guided_gross_margin_pct: Some(40.0),
//!     ..Default::default()
//! };
//!
//! assert!(!guard.check(&inputs, TolerancePreset::Core).passed);
//! assert!(guard.check(&inputs, TolerancePreset::OverlayAdmitted).passed);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod guard;
pub mod kpi;
mod report;

pub use config::{GuardConfig, GuardSeverity, ToleranceBand, TolerancePreset};
pub use error::GuardError;
pub use guard::{median, opex_grid, GuardInputs, NumericGuard};
pub use report::{CheckName, GuardCheck, GuardReport};
