//! Sightline Axis Scoring
//!
//! Pure functions from validated evidence to per-axis scores.
//!
//! - Input resolution: each formula input is taken from the best qualifying
//!   fact; anything missing becomes an explicit data gap
//! - Axis engines: one [`AxisEngine`](sightline_domain::AxisEngine)
//!   implementation per axis ([`GrowthConfidenceEngine`], [`MomentumEngine`])
//! - Stars and confidence: fixed bands and a distance-from-neutral formula
//! - Valuation: a quantitative stage 1 and an annotation-only stage 2
//!
//! # Example
//!
//! ```
//! use sightline_domain::{AxisEngine, KpiInputs};
//! use sightline_scoring::{kpi, stars_for, MomentumEngine, StarBands};
//!
//! let engine = MomentumEngine::default();
//! let inputs = KpiInputs::new()
//!     .with(kpi::GUIDANCE_REVISION_PCT, 10.0)
//!     .with(kpi::COMPOSITE_HEALTH_SCORE, 75.0);
//! let raw = engine.raw_score(&inputs);
//! assert_eq!(stars_for(raw, &StarBands::default()).value(), 3);
//! ```

#![warn(missing_docs)]

mod config;
mod engines;
mod error;
pub mod kpi;
mod resolve;
mod scorer;
mod valuation;

pub use config::{
    GrowthConfidenceWeights, ModelMultipleRow, MomentumWeights, ScoringConfig, StarBands,
    ValuationConfig,
};
pub use engines::{discrete_term, GrowthConfidenceEngine, MomentumEngine};
pub use error::ScoringError;
pub use resolve::{resolve_inputs, ResolutionRules, ResolvedInputs};
pub use scorer::{confidence_for, stars_for, AxisScorer};
pub use valuation::{
    annotate_valuation, apply_hysteresis, color_for_discount, evaluate_valuation,
    model_implied_multiple, ValuationInputs,
};
