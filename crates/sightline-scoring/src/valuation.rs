//! Two-stage valuation axis
//!
//! Stage 1 ([`evaluate_valuation`]) is quantitative and authoritative: it
//! produces the colour category and the decision multiplier. Stage 2
//! ([`annotate_valuation`]) only labels the result; it borrows the stage 1
//! overlay immutably and cannot change it.

use crate::config::{ModelMultipleRow, ValuationConfig};
use crate::kpi;
use crate::resolve::{resolve_inputs, ResolutionRules, ResolvedInputs};
use crate::ScoringError;
use sightline_domain::{
    AxisId, ColorCategory, EvidenceFact, HysteresisBand, ValuationAnnotation, ValuationOverlay,
    ValuationVerdict,
};
use tracing::{debug, info};

/// Inputs of the valuation axis
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValuationInputs {
    /// Observed multiple
    pub actual_multiple: Option<f64>,
    /// Peer median multiple
    pub peer_median_multiple: Option<f64>,
    /// Forward growth, percent
    pub forward_growth_pct: Option<f64>,
    /// Operating margin, percent
    pub operating_margin_pct: Option<f64>,
    /// Growth implied by the current price, percent
    pub implied_growth_pct: Option<f64>,
}

impl ValuationInputs {
    /// Resolve the valuation inputs from validated evidence
    ///
    /// Gaps are reported for the required inputs only; implied growth is
    /// optional and feeds stage 2 alone.
    pub fn resolve(facts: &[EvidenceFact], rules: ResolutionRules) -> (Self, ResolvedInputs) {
        let mut resolved = resolve_inputs(kpi::VALUATION_INPUTS, facts, rules);
        let optional = resolve_inputs(&[kpi::IMPLIED_GROWTH_PCT], facts, rules);
        if let Some(implied) = optional.values.get(kpi::IMPLIED_GROWTH_PCT) {
            resolved.values.insert(kpi::IMPLIED_GROWTH_PCT, implied);
            resolved.supporting.extend(optional.supporting);
        }

        let values = &resolved.values;
        let inputs = Self {
            actual_multiple: values.get(kpi::ACTUAL_MULTIPLE),
            peer_median_multiple: values.get(kpi::PEER_MEDIAN_MULTIPLE),
            forward_growth_pct: values.get(kpi::FORWARD_GROWTH_PCT),
            operating_margin_pct: values.get(kpi::OPERATING_MARGIN_PCT),
            implied_growth_pct: values.get(kpi::IMPLIED_GROWTH_PCT),
        };
        (inputs, resolved)
    }
}

/// Model-implied multiple from the first lookup row whose minimums are met
pub fn model_implied_multiple(
    growth_pct: f64,
    margin_pct: Option<f64>,
    rows: &[ModelMultipleRow],
    fallback: f64,
) -> f64 {
    rows.iter()
        .find(|row| {
            growth_pct >= row.min_growth_pct
                && match row.min_margin_pct {
                    Some(min) => margin_pct.is_some_and(|m| m >= min),
                    None => true,
                }
        })
        .map(|row| row.multiple)
        .unwrap_or(fallback)
}

/// Colour category as a pure function of the discount
///
/// Bands on |discount| are upper-inclusive, so a value on an edge gets the
/// more favourable colour.
pub fn color_for_discount(discount: f64, green_max: f64, amber_max: f64) -> ColorCategory {
    let magnitude = discount.abs();
    if magnitude <= green_max {
        ColorCategory::Green
    } else if magnitude <= amber_max {
        ColorCategory::Amber
    } else {
        ColorCategory::Red
    }
}

/// Keep the previous colour while the discount sits within the hysteresis
/// delta of the edge it crossed
///
/// Returns the category to use and whether the previous one was held.
pub fn apply_hysteresis(
    discount: f64,
    previous: Option<ColorCategory>,
    band: &HysteresisBand,
) -> (ColorCategory, bool) {
    let raw = color_for_discount(discount, band.green_max, band.amber_max);
    let Some(previous) = previous else {
        return (raw, false);
    };
    if previous == raw {
        return (raw, false);
    }

    let magnitude = discount.abs();
    let held = match (previous, raw) {
        (ColorCategory::Green, _) => magnitude <= band.green_max + band.delta,
        (ColorCategory::Amber, ColorCategory::Green) => magnitude >= band.green_max - band.delta,
        (ColorCategory::Amber, _) => magnitude <= band.amber_max + band.delta,
        (ColorCategory::Red, _) => magnitude >= band.amber_max - band.delta,
    };

    if held {
        (previous, true)
    } else {
        (raw, false)
    }
}

/// Stage 1: discount, colour category and multiplier
///
/// `discount = (fair − actual) / fair` with `fair = max(peer, model)`.
/// Without an actual multiple, or without any positive fair value basis,
/// the axis is unavailable.
pub fn evaluate_valuation(
    inputs: &ValuationInputs,
    previous: Option<ColorCategory>,
    config: &ValuationConfig,
) -> Result<ValuationOverlay, ScoringError> {
    let actual = inputs
        .actual_multiple
        .ok_or_else(|| ScoringError::ValuationUnavailable("actual multiple missing".to_string()))?;

    let model = inputs.forward_growth_pct.map(|growth| {
        model_implied_multiple(
            growth,
            inputs.operating_margin_pct,
            &config.model_multiples,
            config.fallback_multiple,
        )
    });
    let fair = match (inputs.peer_median_multiple, model) {
        (Some(peer), Some(model)) => peer.max(model),
        (Some(peer), None) => peer,
        (None, Some(model)) => model,
        (None, None) => {
            return Err(ScoringError::ValuationUnavailable(
                "neither peer median nor forward growth available".to_string(),
            ))
        }
    };
    if !(fair.is_finite() && fair > 0.0) {
        return Err(ScoringError::ValuationUnavailable(format!(
            "fair value basis {} is not positive",
            fair
        )));
    }

    let discount = (fair - actual) / fair;
    let band = HysteresisBand {
        green_max: config.green_max,
        amber_max: config.amber_max,
        delta: config.hysteresis_delta,
    };
    let (color_category, hysteresis_held) = apply_hysteresis(discount, previous, &band);

    info!(
        discount,
        fair,
        actual,
        color = color_category.as_str(),
        hysteresis_held,
        "valuation stage 1"
    );

    Ok(ValuationOverlay {
        color_category,
        discount_pct: discount,
        multiplier: color_category.multiplier(),
        fair_value_basis: fair,
        actual_multiple: actual,
        peer_median_multiple: inputs.peer_median_multiple,
        model_implied_multiple: model,
        hysteresis_band: band,
        hysteresis_held,
    })
}

/// Stage 2: growth-expectation gap, marker tally and verdict label
pub fn annotate_valuation(
    overlay: &ValuationOverlay,
    inputs: &ValuationInputs,
    facts: &[EvidenceFact],
    config: &ValuationConfig,
) -> ValuationAnnotation {
    let growth_gap = match (inputs.forward_growth_pct, inputs.implied_growth_pct) {
        (Some(forward), Some(implied)) if implied != 0.0 => Some((forward - implied) / implied.abs()),
        _ => None,
    };

    let mut positive_markers = 0u32;
    let mut negative_markers = 0u32;
    for fact in facts
        .iter()
        .filter(|f| f.axis_tag == AxisId::Valuation && !f.contradiction_flag)
    {
        let text = fact.excerpt.to_lowercase();
        positive_markers += count_hits(&text, &config.positive_markers);
        negative_markers += count_hits(&text, &config.negative_markers);
    }

    let gap_signal = match growth_gap {
        Some(gap) if gap > config.growth_gap_threshold => 1,
        Some(gap) if gap < -config.growth_gap_threshold => -1,
        _ => 0,
    };
    let marker_signal = (i64::from(positive_markers) - i64::from(negative_markers)).signum();
    let support = gap_signal + marker_signal;

    let verdict = if overlay.discount_pct > 0.0 && support >= 1 {
        ValuationVerdict::UnderpricedJustified
    } else if overlay.discount_pct < 0.0 && support <= -1 {
        ValuationVerdict::OverpricedUnjustified
    } else {
        ValuationVerdict::Neutral
    };

    debug!(?growth_gap, positive_markers, negative_markers, ?verdict, "valuation stage 2");

    ValuationAnnotation {
        growth_gap,
        positive_markers,
        negative_markers,
        verdict,
    }
}

fn count_hits(text: &str, keywords: &[String]) -> u32 {
    keywords
        .iter()
        .filter(|k| !k.is_empty())
        .map(|k| text.matches(k.to_lowercase().as_str()).count() as u32)
        .sum()
}
