//! Sightline Domain Layer
//!
//! This crate contains the value objects shared by every stage of the
//! evidence-gated decision pipeline. It holds no pipeline logic of its own:
//! validation, scoring, overlay, guard and synthesis live in their own crates
//! and depend on the types defined here.
//!
//! ## Key Concepts
//!
//! - **EvidenceFact**: a validated, provenance-tagged claim about a subject
//! - **ProvenanceTier**: PRIMARY, CORROBORATED_SECONDARY or SECONDARY
//! - **AxisScore**: per-axis raw score, star rating and confidence
//! - **ValuationOverlay**: the colour category and multiplier of the valuation axis
//! - **DecisionRecord**: the synthesized index, action and position size
//!
//! Every entity is created fresh per evaluation run and never mutated after
//! validation. All of them serialize with `serde` so a run's output can be
//! persisted and reloaded without loss.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod axis;
pub mod candidate;
pub mod codes;
pub mod context;
pub mod decision;
pub mod evidence;
pub mod inputs;
pub mod rating;
pub mod score;
pub mod tier;
pub mod traits;
pub mod valuation;

// Re-exports for convenience
pub use axis::AxisId;
pub use candidate::{EvidenceCandidate, RawLocator, SkippedInput};
pub use codes::{ErrorCode, ValidationFailure, ValidationWarning};
pub use context::EvaluationContext;
pub use decision::{Action, DecisionRecord};
pub use evidence::{DualAnchorStatus, EvidenceFact, FactId, Locator, Polarity};
pub use inputs::KpiInputs;
pub use rating::{ConfidencePct, Stars};
pub use score::{AxisScore, DataGap, GapReason, OverlayDelta};
pub use tier::ProvenanceTier;
pub use traits::AxisEngine;
pub use valuation::{
    ColorCategory, HysteresisBand, ValuationAnnotation, ValuationOverlay, ValuationVerdict,
};
