//! Decision synthesis: axis stars and the valuation multiplier into one index

use crate::{SynthesisConfig, SynthesizerError};
use chrono::NaiveDate;
use sightline_domain::{Action, AxisScore, ColorCategory, ConfidencePct, DecisionRecord, ValuationOverlay};
use sightline_guard::GuardReport;
use tracing::info;

/// Combines the two primary axes and the valuation overlay
#[derive(Debug, Clone)]
pub struct DecisionSynthesizer {
    config: SynthesisConfig,
}

impl Default for DecisionSynthesizer {
    fn default() -> Self {
        Self::new(SynthesisConfig::default())
    }
}

impl DecisionSynthesizer {
    /// Create a synthesizer with the given configuration
    pub fn new(config: SynthesisConfig) -> Self {
        Self { config }
    }

    /// Create a synthesizer after checking the configuration
    pub fn try_new(config: SynthesisConfig) -> Result<Self, SynthesizerError> {
        config.validate().map_err(SynthesizerError::Config)?;
        Ok(Self::new(config))
    }

    /// Get the configuration
    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Decision index before any clamp
    pub fn raw_index(&self, confidence_axis: &AxisScore, momentum_axis: &AxisScore, multiplier: f64) -> f64 {
        (self.config.weight_momentum * momentum_axis.stars.normalized()
            + self.config.weight_confidence * confidence_axis.stars.normalized())
            * multiplier
    }

    /// Position size for a decision index
    pub fn size_for(&self, index: f64) -> f64 {
        (self.config.size_slope * index).min(self.config.size_cap).max(0.0)
    }

    /// Build the decision record
    ///
    /// Without a valuation overlay the multiplier is 1.0. A RED valuation caps
    /// the index at the RED clamp; a failing critical guard caps the action at
    /// WATCH. `evaluated_on` is recorded only.
    pub fn synthesize(
        &self,
        confidence_axis: &AxisScore,
        momentum_axis: &AxisScore,
        valuation: Option<&ValuationOverlay>,
        guard: &GuardReport,
        evaluated_on: NaiveDate,
    ) -> DecisionRecord {
        let mut rationale = Vec::new();

        let multiplier = valuation.map_or(1.0, |v| v.multiplier);
        rationale.push(format!(
            "momentum {}/5 x {:.2} + growth confidence {}/5 x {:.2}",
            momentum_axis.stars.value(),
            self.config.weight_momentum,
            confidence_axis.stars.value(),
            self.config.weight_confidence
        ));
        for axis in [confidence_axis, momentum_axis] {
            if axis.supporting_facts.is_empty() {
                rationale.push(format!(
                    "{} had no usable evidence: {}/5 and {}% confidence come from a raw score of {:.2}",
                    axis.axis_id.as_str(),
                    axis.stars.value(),
                    axis.confidence_pct.value(),
                    axis.raw_score
                ));
            }
        }
        match valuation {
            Some(v) => rationale.push(format!(
                "valuation {} (discount {:.1}%) multiplier {:.2}",
                v.color_category.as_str(),
                v.discount_pct * 100.0,
                multiplier
            )),
            None => rationale.push("valuation unavailable, multiplier 1.00".to_string()),
        }

        let mut index = self.raw_index(confidence_axis, momentum_axis, multiplier);
        let color_category = valuation.map(|v| v.color_category);
        if color_category == Some(ColorCategory::Red) && index > self.config.red_clamp {
            rationale.push(format!(
                "RED valuation clamps index {:.3} to {:.2}",
                index, self.config.red_clamp
            ));
            index = self.config.red_clamp;
        }

        let mut action = Action::from_index(index, self.config.go_threshold, self.config.watch_threshold);
        if guard.caps_action() && action == Action::Go {
            rationale.push("critical guard failure caps action at WATCH".to_string());
            action = Action::Watch;
        }
        rationale.extend(guard.messages.iter().cloned());

        let size_pct = self.size_for(index);
        let confidence_pct = self.decision_confidence(confidence_axis, momentum_axis, guard);
        if guard.confidence_penalty_pp > 0 {
            rationale.push(format!(
                "guard penalty -{}pp on decision confidence",
                guard.confidence_penalty_pp
            ));
        }

        info!(
            index,
            action = action.as_str(),
            size_pct,
            confidence = confidence_pct.value(),
            "decision synthesized"
        );

        DecisionRecord {
            decision_index: index,
            action,
            size_pct,
            contributing_axis_scores: vec![confidence_axis.clone(), momentum_axis.clone()],
            valuation_multiplier: multiplier,
            color_category,
            confidence_pct,
            rationale,
            evaluated_on,
        }
    }

    fn decision_confidence(
        &self,
        confidence_axis: &AxisScore,
        momentum_axis: &AxisScore,
        guard: &GuardReport,
    ) -> ConfidencePct {
        let sum = i64::from(confidence_axis.confidence_pct.value())
            + i64::from(momentum_axis.confidence_pct.value());
        // Half-up rounding of the mean
        let mean = (sum + 1) / 2;
        let pct = mean - i64::from(guard.confidence_penalty_pp);
        ConfidencePct::clamped(pct.clamp(0, 100) as i32)
    }
}
