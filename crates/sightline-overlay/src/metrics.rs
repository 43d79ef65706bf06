//! Metrics collected while admitting overlay evidence

use serde::{Deserialize, Serialize};
use sightline_domain::AxisId;
use std::collections::BTreeMap;

/// Why a pool fact was not admitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdmissionRejection {
    /// Tier is not SECONDARY
    NotSecondary,
    /// Credence below the minimum
    LowCredence,
    /// Fact is flagged as contradicted
    Contradicted,
    /// Validity window already elapsed
    Expired,
    /// Remaining validity window longer than admitted
    TtlTooLong,
}

/// Metrics collected during one overlay pass
///
/// Tracks facts admitted per axis and facts turned away per reason.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayMetrics {
    /// Facts admitted per axis
    pub admitted: BTreeMap<AxisId, usize>,

    /// Facts rejected per reason
    pub rejected: BTreeMap<AdmissionRejection, usize>,

    /// Axes whose score changed
    pub adjusted_axes: usize,
}

impl OverlayMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an admitted fact
    pub fn record_admission(&mut self, axis: AxisId) {
        *self.admitted.entry(axis).or_insert(0) += 1;
    }

    /// Record a rejected fact
    pub fn record_rejection(&mut self, reason: AdmissionRejection) {
        *self.rejected.entry(reason).or_insert(0) += 1;
    }

    /// Record an axis whose score changed
    pub fn record_adjustment(&mut self) {
        self.adjusted_axes += 1;
    }

    /// Total facts admitted across all axes
    pub fn total_admitted(&self) -> usize {
        self.admitted.values().sum()
    }

    /// Total facts rejected
    pub fn total_rejected(&self) -> usize {
        self.rejected.values().sum()
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Overlay Metrics Summary".to_string(),
            format!("Admitted: {}", self.total_admitted()),
            format!("Rejected: {}", self.total_rejected()),
            format!("Axes adjusted: {}", self.adjusted_axes),
        ];

        for (axis, count) in &self.admitted {
            lines.push(format!("  {}: {}", axis, count));
        }
        for (reason, count) in &self.rejected {
            lines.push(format!("  {:?}: {}", reason, count));
        }

        lines.join("\n")
    }
}
