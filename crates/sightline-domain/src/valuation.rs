//! Valuation overlay (stage 1) and its qualitative annotation (stage 2)

use serde::{Deserialize, Serialize};

/// Colour category of the valuation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorCategory {
    /// Priced close to fair value
    Green,
    /// Moderate gap to fair value
    Amber,
    /// Large gap to fair value
    Red,
}

impl ColorCategory {
    /// Fixed decision multiplier of the category
    pub fn multiplier(&self) -> f64 {
        match self {
            ColorCategory::Green => 1.05,
            ColorCategory::Amber => 0.90,
            ColorCategory::Red => 0.75,
        }
    }

    /// Wire name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorCategory::Green => "GREEN",
            ColorCategory::Amber => "AMBER",
            ColorCategory::Red => "RED",
        }
    }

    /// Parse a category name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "GREEN" => Some(ColorCategory::Green),
            "AMBER" => Some(ColorCategory::Amber),
            "RED" => Some(ColorCategory::Red),
            _ => None,
        }
    }
}

impl std::str::FromStr for ColorCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid colour category: {}", s))
    }
}

/// Band edges on |discount| and the hysteresis delta guarding flips
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HysteresisBand {
    /// Upper edge of GREEN (inclusive)
    pub green_max: f64,
    /// Upper edge of AMBER (inclusive)
    pub amber_max: f64,
    /// Distance past an edge required before leaving the previous category
    pub delta: f64,
}

/// Authoritative, quantitative output of the valuation axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationOverlay {
    /// Colour category
    pub color_category: ColorCategory,
    /// (fairValueBasis - actualMultiple) / fairValueBasis
    pub discount_pct: f64,
    /// Decision multiplier, fixed by the colour
    pub multiplier: f64,
    /// max(peer median, model implied)
    pub fair_value_basis: f64,
    /// Observed multiple
    pub actual_multiple: f64,
    /// Peer median multiple, when disclosed
    pub peer_median_multiple: Option<f64>,
    /// Multiple from the growth/margin lookup, when forward growth is known
    pub model_implied_multiple: Option<f64>,
    /// Band edges and flip guard
    pub hysteresis_band: HysteresisBand,
    /// Whether the previous category was held by the hysteresis guard
    pub hysteresis_held: bool,
}

/// Verdict label of the qualitative annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValuationVerdict {
    /// Trades below fair value and the evidence supports it
    UnderpricedJustified,
    /// Trades above fair value and the evidence does not support it
    OverpricedUnjustified,
    /// Neither
    Neutral,
}

/// Annotation-only second stage of the valuation axis
///
/// Never feeds back into the overlay's category or multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationAnnotation {
    /// (forward growth - market implied growth) / |market implied growth|
    pub growth_gap: Option<f64>,
    /// Positive marker hits
    pub positive_markers: u32,
    /// Negative marker hits
    pub negative_markers: u32,
    /// Verdict label
    pub verdict: ValuationVerdict,
}

impl ValuationAnnotation {
    /// Signed marker tally
    pub fn marker_balance(&self) -> i64 {
        i64::from(self.positive_markers) - i64::from(self.negative_markers)
    }
}
