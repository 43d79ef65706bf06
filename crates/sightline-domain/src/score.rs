//! Per-axis scoring results

use crate::{AxisId, ConfidencePct, FactId, Stars};
use serde::{Deserialize, Serialize};

/// Why a required input could not be sourced
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GapReason {
    /// Evidence exists only below the tier the axis requires
    NotDisclosed,
    /// Evidence exists only outside its validity window
    DifferentPeriod,
    /// No evidence carries the KPI at all
    TagAbsent,
    /// Evidence exists but carries no numeric value
    PhraseNotFound,
}

/// An explicit marker for an input the axis had to do without
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataGap {
    /// KPI key of the missing input
    pub input: String,
    /// Reason code
    pub reason: GapReason,
    /// Days until the gap should be re-checked
    pub recheck_ttl_days: u32,
}

/// Star and confidence adjustment applied by the confidence overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayDelta {
    /// Signed star delta before clamping
    pub stars: i32,
    /// Signed confidence delta in percentage points before clamping
    pub confidence_pp: i32,
    /// Admitted facts that produced the delta
    pub admitted: Vec<FactId>,
}

impl OverlayDelta {
    /// Whether the delta changes nothing
    pub fn is_zero(&self) -> bool {
        self.stars == 0 && self.confidence_pp == 0
    }
}

/// Result of scoring one axis
///
/// `base_stars` and `base_confidence_pct` keep the engine's own output so the
/// overlay is always applied from the same starting point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisScore {
    /// Axis identifier
    pub axis_id: AxisId,
    /// Continuous formula output
    pub raw_score: f64,
    /// Star rating after any overlay
    pub stars: Stars,
    /// Confidence after any overlay
    pub confidence_pct: ConfidencePct,
    /// Star rating from the engine alone
    pub base_stars: Stars,
    /// Confidence from the engine alone
    pub base_confidence_pct: ConfidencePct,
    /// Facts whose values fed the formula, in input order
    pub supporting_facts: Vec<FactId>,
    /// Whether the overlay changed this score
    pub overlay_applied: bool,
    /// Overlay adjustment, when the overlay ran
    pub overlay: Option<OverlayDelta>,
    /// Inputs the axis had to do without
    pub data_gaps: Vec<DataGap>,
}

impl AxisScore {
    /// Create a score straight from an engine
    pub fn new(
        axis_id: AxisId,
        raw_score: f64,
        stars: Stars,
        confidence_pct: ConfidencePct,
        supporting_facts: Vec<FactId>,
        data_gaps: Vec<DataGap>,
    ) -> Self {
        Self {
            axis_id,
            raw_score,
            stars,
            confidence_pct,
            base_stars: stars,
            base_confidence_pct: confidence_pct,
            supporting_facts,
            overlay_applied: false,
            overlay: None,
            data_gaps,
        }
    }

    /// Whether any input was missing
    pub fn has_gaps(&self) -> bool {
        !self.data_gaps.is_empty()
    }
}
