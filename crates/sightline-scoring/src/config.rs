//! Scoring configuration: formula weights, bands and thresholds

use serde::{Deserialize, Serialize};
use sightline_domain::ProvenanceTier;

/// Configuration for the axis engines and the valuation axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Lowest tier whose facts may feed axis inputs
    pub min_input_tier: ProvenanceTier,

    /// Days until a data gap should be re-checked
    pub recheck_ttl_days: u32,

    /// Raw score treated as neutral by the confidence formula
    pub neutral_point: f64,

    /// Confidence at the neutral point
    pub confidence_base: f64,

    /// Confidence gained per unit of distance from the neutral point
    pub confidence_slope: f64,

    /// Confidence lost per data gap (percentage points)
    pub gap_penalty_pp: i32,

    /// Raw score to star bands
    pub star_bands: StarBands,

    /// Growth-confidence formula
    pub growth_confidence: GrowthConfidenceWeights,

    /// Momentum formula
    pub momentum: MomentumWeights,

    /// Valuation axis
    pub valuation: ValuationConfig,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_input_tier: ProvenanceTier::CorroboratedSecondary,
            recheck_ttl_days: 7,
            neutral_point: 3.5,
            confidence_base: 50.0,
            confidence_slope: 6.0,
            gap_penalty_pp: 10,
            star_bands: StarBands::default(),
            growth_confidence: GrowthConfidenceWeights::default(),
            momentum: MomentumWeights::default(),
            valuation: ValuationConfig::default(),
        }
    }
}

impl ScoringConfig {
    /// Only PRIMARY facts feed axis inputs
    pub fn strict() -> Self {
        Self {
            min_input_tier: ProvenanceTier::Primary,
            ..Self::default()
        }
    }

    /// Any validated fact may feed axis inputs
    pub fn lenient() -> Self {
        Self {
            min_input_tier: ProvenanceTier::Secondary,
            gap_penalty_pp: 5,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.neutral_point.is_finite()
            && self.confidence_base.is_finite()
            && self.confidence_slope.is_finite())
        {
            return Err("confidence parameters must be finite".to_string());
        }
        if self.confidence_slope < 0.0 {
            return Err("confidence_slope cannot be negative".to_string());
        }
        if self.gap_penalty_pp < 0 {
            return Err("gap_penalty_pp cannot be negative".to_string());
        }
        self.star_bands.validate()?;
        self.momentum.validate()?;
        self.valuation.validate()
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

/// Lower edges (inclusive) of the 2- to 5-star bands; anything below
/// `two_stars` is one star
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarBands {
    /// Lower edge of 2 stars
    pub two_stars: f64,
    /// Lower edge of 3 stars
    pub three_stars: f64,
    /// Lower edge of 4 stars
    pub four_stars: f64,
    /// Lower edge of 5 stars
    pub five_stars: f64,
}

impl Default for StarBands {
    fn default() -> Self {
        Self {
            two_stars: 0.0,
            three_stars: 2.0,
            four_stars: 5.0,
            five_stars: 8.0,
        }
    }
}

impl StarBands {
    /// Edges in ascending order
    pub fn edges(&self) -> [f64; 4] {
        [self.two_stars, self.three_stars, self.four_stars, self.five_stars]
    }

    fn validate(&self) -> Result<(), String> {
        let edges = self.edges();
        if edges.iter().any(|e| !e.is_finite()) {
            return Err("star band edges must be finite".to_string());
        }
        if edges.windows(2).any(|w| w[0] >= w[1]) {
            return Err("star band edges must be strictly ascending".to_string());
        }
        Ok(())
    }
}

/// Weights of the growth-confidence formula
///
/// `raw = forward·g + margin_delta·m − dilution·d − capex·c`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfidenceWeights {
    /// Weight of forward growth
    pub forward_growth: f64,
    /// Weight of margin delta
    pub margin_delta: f64,
    /// Weight of dilution (subtracted)
    pub dilution: f64,
    /// Weight of capital intensity (subtracted)
    pub capex_intensity: f64,
}

impl Default for GrowthConfidenceWeights {
    fn default() -> Self {
        Self {
            forward_growth: 0.25,
            margin_delta: 0.5,
            dilution: 0.5,
            capex_intensity: 0.2,
        }
    }
}

/// Weights and discrete-term thresholds of the momentum formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumWeights {
    /// Weight of next-period growth
    pub next_period_growth: f64,
    /// Weight of guidance revision
    pub guidance_revision: f64,
    /// Weight of order/backlog growth
    pub order_backlog_growth: f64,
    /// Weight of the margin term
    pub margin_term: f64,
    /// Weight of the health term
    pub health_term: f64,
    /// Margin delta at or above which the margin term is +1
    pub margin_upper_pp: f64,
    /// Margin delta at or below which the margin term is −1
    pub margin_lower_pp: f64,
    /// Health score at or above which the health term is +1
    pub health_upper: f64,
    /// Health score below which the health term is −1
    pub health_lower: f64,
}

impl Default for MomentumWeights {
    fn default() -> Self {
        Self {
            next_period_growth: 0.15,
            guidance_revision: 0.3,
            order_backlog_growth: 0.1,
            margin_term: 1.0,
            health_term: 1.0,
            margin_upper_pp: 1.0,
            margin_lower_pp: -1.0,
            health_upper: 70.0,
            health_lower: 40.0,
        }
    }
}

impl MomentumWeights {
    fn validate(&self) -> Result<(), String> {
        if self.margin_lower_pp >= self.margin_upper_pp {
            return Err("margin_lower_pp must be below margin_upper_pp".to_string());
        }
        if self.health_lower >= self.health_upper {
            return Err("health_lower must be below health_upper".to_string());
        }
        Ok(())
    }
}

/// One row of the model-implied multiple lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMultipleRow {
    /// Minimum forward growth (percent)
    pub min_growth_pct: f64,
    /// Minimum operating margin (percent), if the row requires one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_margin_pct: Option<f64>,
    /// Multiple assigned by the row
    pub multiple: f64,
}

/// Configuration of the two-stage valuation axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    /// Upper edge of GREEN on |discount| (inclusive)
    pub green_max: f64,
    /// Upper edge of AMBER on |discount| (inclusive)
    pub amber_max: f64,
    /// Hysteresis distance guarding category flips
    pub hysteresis_delta: f64,
    /// Multiple used when no lookup row matches
    pub fallback_multiple: f64,
    /// Growth gap beyond which stage 2 counts the gap as a signal
    pub growth_gap_threshold: f64,
    /// Keywords counted as positive markers
    pub positive_markers: Vec<String>,
    /// Keywords counted as negative markers
    pub negative_markers: Vec<String>,
    /// Lookup rows, most demanding first
    pub model_multiples: Vec<ModelMultipleRow>,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            green_max: 0.10,
            amber_max: 0.25,
            hysteresis_delta: 0.02,
            fallback_multiple: 12.0,
            growth_gap_threshold: 0.10,
            positive_markers: [
                "record",
                "beat",
                "raised guidance",
                "upgrade",
                "accelerat",
                "buyback",
                "market share gain",
                "outperform",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            negative_markers: [
                "miss",
                "cut guidance",
                "downgrade",
                "impairment",
                "slowdown",
                "lawsuit",
                "write-down",
                "underperform",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            model_multiples: vec![
                ModelMultipleRow {
                    min_growth_pct: 35.0,
                    min_margin_pct: Some(25.0),
                    multiple: 40.0,
                },
                ModelMultipleRow {
                    min_growth_pct: 20.0,
                    min_margin_pct: Some(15.0),
                    multiple: 28.0,
                },
                ModelMultipleRow {
                    min_growth_pct: 10.0,
                    min_margin_pct: None,
                    multiple: 20.0,
                },
            ],
        }
    }
}

impl ValuationConfig {
    fn validate(&self) -> Result<(), String> {
        if !(0.0 < self.green_max && self.green_max < self.amber_max) {
            return Err("valuation bands require 0 < green_max < amber_max".to_string());
        }
        if self.hysteresis_delta < 0.0 || self.hysteresis_delta >= self.green_max {
            return Err("hysteresis_delta must be in [0, green_max)".to_string());
        }
        if self.fallback_multiple <= 0.0
            || self.model_multiples.iter().any(|row| row.multiple <= 0.0)
        {
            return Err("model multiples must be positive".to_string());
        }
        Ok(())
    }
}
