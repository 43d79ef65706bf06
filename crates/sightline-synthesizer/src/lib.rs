//! Sightline Decision Synthesizer
//!
//! Combines the growth-confidence and momentum axes with the valuation
//! multiplier into one decision index, an action and a position size, and
//! wires every stage into the canonical [`Pipeline`].
//!
//! # Decision index
//!
//! ```text
//! DI = (w_momentum x momentum_stars/5 + w_confidence x confidence_stars/5) x multiplier
//! ```
//!
//! | Rule | Default |
//! |------|---------|
//! | Weights | momentum 0.6, confidence 0.4 |
//! | RED valuation | DI clamped to at most 0.55 |
//! | GO / WATCH | DI >= 0.55 / DI >= 0.32, else NO_GO |
//! | Size | min(15%, 20 x DI) |
//!
//! # Pipeline
//!
//! ```text
//! EvidenceSource → Extractor → Gatekeeper → AxisScorer (+ valuation)
//!     → ConfidenceOverlay → NumericGuard → DecisionSynthesizer → DecisionDocument
//! ```
//!
//! The only errors are an empty evidence set, an unparseable evidence source
//! and an invalid configuration; everything else is reported in the
//! [`DecisionDocument`].

#![warn(missing_docs)]

mod config;
mod document;
mod error;
mod pipeline;
mod synthesis;

pub use config::{PipelineConfig, SynthesisConfig};
pub use document::{AxisSummary, DecisionDocument};
pub use error::SynthesizerError;
pub use pipeline::{EvaluationOptions, Pipeline};
pub use synthesis::DecisionSynthesizer;
