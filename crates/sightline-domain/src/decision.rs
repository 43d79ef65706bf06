//! Decision record - the synthesized output of a run

use crate::{AxisScore, ColorCategory, ConfidencePct};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Categorical recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Below the watch threshold
    NoGo,
    /// Between the watch and go thresholds
    Watch,
    /// At or above the go threshold
    Go,
}

impl Action {
    /// Classify a decision index against fixed thresholds (both inclusive)
    pub fn from_index(index: f64, go_threshold: f64, watch_threshold: f64) -> Self {
        if index >= go_threshold {
            Action::Go
        } else if index >= watch_threshold {
            Action::Watch
        } else {
            Action::NoGo
        }
    }

    /// Wire name of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Go => "GO",
            Action::Watch => "WATCH",
            Action::NoGo => "NO_GO",
        }
    }
}

/// Final synthesized decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRecord {
    /// Decision index
    pub decision_index: f64,
    /// Recommendation derived from the index
    pub action: Action,
    /// Position size in percent
    pub size_pct: f64,
    /// Axis scores the index was built from (growth confidence, then momentum)
    pub contributing_axis_scores: Vec<AxisScore>,
    /// Multiplier applied from the valuation overlay
    pub valuation_multiplier: f64,
    /// Colour category, when valuation was available
    pub color_category: Option<ColorCategory>,
    /// Confidence annotation after guard penalties
    pub confidence_pct: ConfidencePct,
    /// Human-readable trail of how the decision was reached
    pub rationale: Vec<String>,
    /// Evaluation date (recorded only, not used by the logic)
    pub evaluated_on: NaiveDate,
}
