//! Sightline Gatekeeper
//!
//! The evidence validator: the only place where parsed candidates become
//! [`EvidenceFact`](sightline_domain::EvidenceFact)s.
//!
//! The Gatekeeper provides:
//! - Excerpt length checking (at most 25 words)
//! - Anchor validation (text-fragment URL or backup locator, never both)
//! - Deterministic backup-locator content hashing
//! - Provenance tier assignment from source domains
//! - A batch [`ValidationReport`] that keeps every rejected record
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use sightline_domain::{AxisId, EvidenceCandidate, ProvenanceTier, RawLocator};
//! use sightline_gatekeeper::{Gatekeeper, ValidationConfig};
//!
//! let gatekeeper = Gatekeeper::new(ValidationConfig::default());
//! let candidate = EvidenceCandidate::new(
//!     NaiveDate::from_ymd_opt(2026, 9, 30).unwrap(),
//!     ProvenanceTier::Primary,
//!     AxisId::Momentum,
//!     "Orders rose 18% year over year.",
//!     "order_backlog_growth_pct",
//!     RawLocator::url("https://www.sec.gov/x.htm#:~:text=Orders"),
//! );
//!
//! let batch = gatekeeper.validate_batch(&[candidate]);
//! assert_eq!(batch.facts.len(), 1);
//! assert_eq!(batch.report.pass_rate, 1.0);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod locator;
mod provenance;
mod report;
mod validator;

pub use config::ValidationConfig;
pub use error::GatekeeperError;
pub use locator::{content_hash, normalize_excerpt};
pub use provenance::{is_authoritative, registrable_domain};
pub use report::{RejectedRecord, ValidationReport};
pub use validator::{
    Gatekeeper, ValidatedBatch, ValidationOutcome, ValidationResult, ValidationStatus,
};
