//! Scoring axes

use serde::{Deserialize, Serialize};

/// An independent scoring axis
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisId {
    /// Growth-confidence axis (forward growth, margin delta, dilution, capital intensity)
    GrowthConfidence,

    /// Momentum axis (next-period growth, guidance revision, backlog, margin and health terms)
    Momentum,

    /// Valuation / cognition-gap axis
    Valuation,
}

impl AxisId {
    /// All axes in canonical order
    pub const ALL: [AxisId; 3] = [AxisId::GrowthConfidence, AxisId::Momentum, AxisId::Valuation];

    /// Human-facing axis name used in the decision document
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisId::GrowthConfidence => "growth_confidence",
            AxisId::Momentum => "momentum",
            AxisId::Valuation => "valuation",
        }
    }

    /// Parse an axis tag from an evidence record
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "growth" | "confidence" | "growth_confidence" | "growth-confidence" => {
                Some(AxisId::GrowthConfidence)
            }
            "momentum" => Some(AxisId::Momentum),
            "valuation" | "cognition_gap" | "cognition-gap" => Some(AxisId::Valuation),
            _ => None,
        }
    }
}

impl std::fmt::Display for AxisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AxisId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid axis tag: {}", s))
    }
}
