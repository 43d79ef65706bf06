//! Axis formulas, one [`AxisEngine`] per axis

use crate::config::{GrowthConfidenceWeights, MomentumWeights};
use crate::kpi;
use sightline_domain::{AxisEngine, AxisId, KpiInputs};

/// Map a value to −1, 0 or +1 against a neutral band
///
/// `value >= upper` is +1; `value < lower` is −1, or `value <= lower` when
/// `lower_inclusive` is set; anything in between is 0.
pub fn discrete_term(value: f64, lower: f64, upper: f64, lower_inclusive: bool) -> f64 {
    if value >= upper {
        1.0
    } else if value < lower || (lower_inclusive && value == lower) {
        -1.0
    } else {
        0.0
    }
}

/// Sum of `weight · value` over the inputs that are present
fn weighted_sum(inputs: &KpiInputs, terms: &[(&str, f64)]) -> f64 {
    terms
        .iter()
        .filter_map(|(key, weight)| inputs.get(key).map(|value| weight * value))
        .sum()
}

/// Growth-confidence axis
///
/// `0.25·forward_growth + 0.5·margin_delta − 0.5·dilution − 0.2·capex_intensity`
/// with the default weights.
#[derive(Debug, Clone, Default)]
pub struct GrowthConfidenceEngine {
    weights: GrowthConfidenceWeights,
}

impl GrowthConfidenceEngine {
    /// Create the engine with the given weights
    pub fn new(weights: GrowthConfidenceWeights) -> Self {
        Self { weights }
    }
}

impl AxisEngine for GrowthConfidenceEngine {
    fn axis(&self) -> AxisId {
        AxisId::GrowthConfidence
    }

    fn inputs(&self) -> &'static [&'static str] {
        kpi::GROWTH_CONFIDENCE_INPUTS
    }

    fn raw_score(&self, inputs: &KpiInputs) -> f64 {
        let w = &self.weights;
        weighted_sum(
            inputs,
            &[
                (kpi::FORWARD_GROWTH_PCT, w.forward_growth),
                (kpi::MARGIN_DELTA_PP, w.margin_delta),
                (kpi::DILUTION_PCT, -w.dilution),
                (kpi::CAPEX_INTENSITY_PCT, -w.capex_intensity),
            ],
        )
    }
}

/// Momentum axis
///
/// Weighted sum of next-period growth, guidance revision and order/backlog
/// growth, plus a discrete margin term and a discrete health term.
#[derive(Debug, Clone, Default)]
pub struct MomentumEngine {
    weights: MomentumWeights,
}

impl MomentumEngine {
    /// Create the engine with the given weights
    pub fn new(weights: MomentumWeights) -> Self {
        Self { weights }
    }

    /// +1 / 0 / −1 from the margin delta
    pub fn margin_term(&self, margin_delta_pp: f64) -> f64 {
        discrete_term(
            margin_delta_pp,
            self.weights.margin_lower_pp,
            self.weights.margin_upper_pp,
            true,
        )
    }

    /// +1 / 0 / −1 from the composite health score
    pub fn health_term(&self, health_score: f64) -> f64 {
        discrete_term(
            health_score,
            self.weights.health_lower,
            self.weights.health_upper,
            false,
        )
    }
}

impl AxisEngine for MomentumEngine {
    fn axis(&self) -> AxisId {
        AxisId::Momentum
    }

    fn inputs(&self) -> &'static [&'static str] {
        kpi::MOMENTUM_INPUTS
    }

    fn raw_score(&self, inputs: &KpiInputs) -> f64 {
        let w = &self.weights;
        let linear = weighted_sum(
            inputs,
            &[
                (kpi::NEXT_PERIOD_GROWTH_PCT, w.next_period_growth),
                (kpi::GUIDANCE_REVISION_PCT, w.guidance_revision),
                (kpi::ORDER_BACKLOG_GROWTH_PCT, w.order_backlog_growth),
            ],
        );
        let margin = inputs
            .get(kpi::MARGIN_DELTA_PP)
            .map(|v| w.margin_term * self.margin_term(v))
            .unwrap_or(0.0);
        let health = inputs
            .get(kpi::COMPOSITE_HEALTH_SCORE)
            .map(|v| w.health_term * self.health_term(v))
            .unwrap_or(0.0);
        linear + margin + health
    }
}
