//! Output decision document

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sightline_domain::{
    AxisId, AxisScore, ColorCategory, DataGap, DecisionRecord, ValuationAnnotation,
    ValuationOverlay,
};
use sightline_gatekeeper::ValidationReport;
use sightline_guard::GuardReport;
use sightline_overlay::OverlayMetrics;

/// Per-axis view of the decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisSummary {
    /// Axis
    pub axis_name: AxisId,
    /// Final stars
    pub stars: u8,
    /// Final confidence
    pub confidence_pct: u8,
    /// The market already prices this view (valuation is GREEN)
    pub market_embedded_flag: bool,
    /// Probability-style weight of the upside reading
    pub direction_up_pct: u8,
    /// 100 - `direction_up_pct`
    pub direction_down_pct: u8,
    /// Facts the score rests on
    pub supporting_fact_count: usize,
    /// Whether the overlay moved this axis
    pub overlay_applied: bool,
}

impl AxisSummary {
    /// Summarize an axis score against the neutral raw score
    pub fn from_score(
        score: &AxisScore,
        valuation: Option<&ValuationOverlay>,
        neutral_point: f64,
    ) -> Self {
        let confidence = score.confidence_pct.value();
        let up = if score.raw_score >= neutral_point {
            confidence
        } else {
            100 - confidence
        };
        Self {
            axis_name: score.axis_id,
            stars: score.stars.value(),
            confidence_pct: confidence,
            market_embedded_flag: valuation
                .is_some_and(|v| v.color_category == ColorCategory::Green),
            direction_up_pct: up,
            direction_down_pct: 100 - up,
            supporting_fact_count: score.supporting_facts.len(),
            overlay_applied: score.overlay_applied,
        }
    }
}

/// Complete output of one evaluation run
///
/// Always produced in full: a valuation that could not be computed is `None`
/// with the reason in `warnings`, never a guessed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionDocument {
    /// Subject evaluated
    pub subject: String,
    /// Evaluation date
    pub evaluated_on: NaiveDate,
    /// Growth-confidence then momentum
    pub axes: Vec<AxisSummary>,
    /// Valuation stage 1, if available
    pub valuation: Option<ValuationOverlay>,
    /// Valuation stage 2, if stage 1 was available
    pub valuation_annotation: Option<ValuationAnnotation>,
    /// The decision
    pub decision: DecisionRecord,
    /// Numerical guard results
    pub auto_checks: GuardReport,
    /// Validation of the evidence batch
    pub validation: ValidationReport,
    /// Overlay admission metrics, when the overlay ran
    pub overlay: Option<OverlayMetrics>,
    /// Inputs that could not be sourced, across all axes
    pub data_gaps: Vec<DataGap>,
    /// Run-level warnings
    pub warnings: Vec<String>,
}

impl DecisionDocument {
    /// Whether the valuation axis could be computed
    pub fn valuation_available(&self) -> bool {
        self.valuation.is_some()
    }

    /// Summary for one axis
    pub fn axis(&self, axis: AxisId) -> Option<&AxisSummary> {
        self.axes.iter().find(|a| a.axis_name == axis)
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
