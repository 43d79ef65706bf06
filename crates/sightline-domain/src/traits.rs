//! Trait definitions for pluggable pipeline behaviour
//!
//! These traits define the seams between the domain model and the stage
//! crates. Implementations live in other crates.

use crate::{AxisId, KpiInputs};

/// A scoring axis formula
///
/// Implemented once per axis by the scoring crate. The shared driver
/// resolves inputs from evidence, calls
/// [`AxisEngine::raw_score`], then maps the result to stars and confidence.
pub trait AxisEngine {
    /// Axis this engine scores
    fn axis(&self) -> AxisId;

    /// KPI keys the formula reads, in formula order
    fn inputs(&self) -> &'static [&'static str];

    /// Weighted combination of the resolved inputs
    ///
    /// Missing inputs must be omitted from the combination, never read as zero.
    fn raw_score(&self, inputs: &KpiInputs) -> f64;
}
