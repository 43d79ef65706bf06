//! Shared driver: inputs → formula → stars and confidence

use crate::config::{ScoringConfig, StarBands};
use crate::engines::{GrowthConfidenceEngine, MomentumEngine};
use crate::resolve::{resolve_inputs, ResolutionRules};
use crate::ScoringError;
use chrono::NaiveDate;
use sightline_domain::{AxisEngine, AxisScore, ConfidencePct, EvidenceFact, Stars};
use tracing::{info, warn};

/// Map a raw score to stars through lower-inclusive bands
///
/// A value exactly on an edge falls in the higher band; NaN is one star.
pub fn stars_for(raw: f64, bands: &StarBands) -> Stars {
    let reached = bands.edges().iter().filter(|edge| raw >= **edge).count();
    Stars::clamped(1 + reached as i32)
}

/// Confidence from the distance to the neutral point, less the gap penalty
pub fn confidence_for(raw: f64, gaps: usize, config: &ScoringConfig) -> ConfidencePct {
    if !raw.is_finite() {
        return ConfidencePct::clamped(0);
    }
    let base = (config.confidence_base + config.confidence_slope * (raw - config.neutral_point).abs())
        .round();
    let penalty = i64::from(config.gap_penalty_pp) * gaps as i64;
    let pct = (base as i64 - penalty).clamp(i64::from(i32::MIN), i64::from(i32::MAX));
    ConfidencePct::clamped(pct as i32)
}

/// Scores axes from validated evidence
#[derive(Debug, Clone)]
pub struct AxisScorer {
    config: ScoringConfig,
    growth: GrowthConfidenceEngine,
    momentum: MomentumEngine,
}

impl AxisScorer {
    /// Create a scorer after checking the configuration
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringError> {
        config.validate().map_err(ScoringError::Config)?;
        Ok(Self {
            growth: GrowthConfidenceEngine::new(config.growth_confidence),
            momentum: MomentumEngine::new(config.momentum),
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Resolution rules for an evaluation date
    pub fn rules(&self, as_of: NaiveDate) -> ResolutionRules {
        ResolutionRules {
            as_of,
            min_tier: self.config.min_input_tier,
            recheck_ttl_days: self.config.recheck_ttl_days,
        }
    }

    /// Score one axis with the given engine
    ///
    /// Missing inputs are recorded as data gaps and left out of the formula.
    /// An axis with no inputs at all scores a raw 0 at minimum confidence.
    pub fn score_axis(
        &self,
        engine: &dyn AxisEngine,
        facts: &[EvidenceFact],
        as_of: NaiveDate,
    ) -> AxisScore {
        let resolved = resolve_inputs(engine.inputs(), facts, self.rules(as_of));
        for gap in &resolved.gaps {
            warn!(
                axis = %engine.axis(),
                input = %gap.input,
                reason = ?gap.reason,
                "data gap"
            );
        }

        let (raw, confidence) = if resolved.values.is_empty() {
            (0.0, ConfidencePct::clamped(0))
        } else {
            let raw = engine.raw_score(&resolved.values);
            (raw, confidence_for(raw, resolved.gaps.len(), &self.config))
        };
        let stars = stars_for(raw, &self.config.star_bands);

        info!(
            axis = %engine.axis(),
            raw,
            stars = stars.value(),
            confidence = confidence.value(),
            gaps = resolved.gaps.len(),
            "scored axis"
        );

        AxisScore::new(
            engine.axis(),
            raw,
            stars,
            confidence,
            resolved.supporting,
            resolved.gaps,
        )
    }

    /// Score the growth-confidence axis
    pub fn score_growth_confidence(&self, facts: &[EvidenceFact], as_of: NaiveDate) -> AxisScore {
        self.score_axis(&self.growth, facts, as_of)
    }

    /// Score the momentum axis
    pub fn score_momentum(&self, facts: &[EvidenceFact], as_of: NaiveDate) -> AxisScore {
        self.score_axis(&self.momentum, facts, as_of)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kpi;
    use sightline_domain::{
        AxisId, DualAnchorStatus, FactId, GapReason, Locator, Polarity, ProvenanceTier,
    };

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()
    }

    fn primary(kpi: &str, value: f64) -> EvidenceFact {
        let asof = NaiveDate::from_ymd_opt(2026, 9, 30).unwrap();
        let url = format!("https://www.sec.gov/{}.htm#:~:text=x", kpi);
        EvidenceFact {
            id: FactId::derive(kpi, asof, &url, "x"),
            asof,
            tier: ProvenanceTier::Primary,
            axis_tag: AxisId::Momentum,
            excerpt: "x".to_string(),
            locator: Locator::TextFragment {
                url,
                fragment: "x".to_string(),
            },
            kpi_key: kpi.to_string(),
            numeric_value: Some(value),
            unit: "%".to_string(),
            ttl_days: 30,
            contradiction_flag: false,
            polarity: Polarity::Neutral,
            credence: 90,
            anchor_status: DualAnchorStatus::Confirmed,
            source_domains: vec!["sec.gov".to_string()],
        }
    }

    #[test]
    fn test_star_bands() {
        let bands = StarBands::default();
        assert_eq!(stars_for(-0.1, &bands).value(), 1);
        assert_eq!(stars_for(0.0, &bands).value(), 2);
        assert_eq!(stars_for(1.99, &bands).value(), 2);
        assert_eq!(stars_for(2.0, &bands).value(), 3);
        assert_eq!(stars_for(5.0, &bands).value(), 4);
        assert_eq!(stars_for(6.2, &bands).value(), 4);
        assert_eq!(stars_for(8.0, &bands).value(), 5);
        assert_eq!(stars_for(f64::NAN, &bands).value(), 1);
    }

    #[test]
    fn test_confidence_formula() {
        let config = ScoringConfig::default();
        assert_eq!(confidence_for(3.5, 0, &config).value(), 50);
        // 50 + 6 * 2.7 = 66.2
        assert_eq!(confidence_for(6.2, 0, &config).value(), 66);
        assert_eq!(confidence_for(6.2, 1, &config).value(), 56);
        assert_eq!(confidence_for(6.2, 3, &config).value(), 45);
        assert_eq!(confidence_for(20.0, 0, &config).value(), 95);
        assert_eq!(confidence_for(f64::INFINITY, 0, &config).value(), 45);
    }

    #[test]
    fn test_momentum_scenario_four_stars() {
        let scorer = AxisScorer::new(ScoringConfig::default()).unwrap();
        // 0.15*12 + 0.3*5 + 0.1*19 + 1 (margin) + 0 (health) = 6.2
        let facts = vec![
            primary(kpi::NEXT_PERIOD_GROWTH_PCT, 12.0),
            primary(kpi::GUIDANCE_REVISION_PCT, 5.0),
            primary(kpi::ORDER_BACKLOG_GROWTH_PCT, 19.0),
            primary(kpi::MARGIN_DELTA_PP, 1.5),
            primary(kpi::COMPOSITE_HEALTH_SCORE, 55.0),
        ];
        let score = scorer.score_momentum(&facts, as_of());

        assert!((score.raw_score - 6.2).abs() < 1e-9);
        assert_eq!(score.stars.value(), 4);
        assert_eq!(score.confidence_pct.value(), 66);
        assert_eq!(score.supporting_facts.len(), 5);
        assert!(!score.has_gaps());
        assert_eq!(score.base_stars, score.stars);
    }

    #[test]
    fn test_gaps_reduce_confidence_not_default_to_zero() {
        let scorer = AxisScorer::new(ScoringConfig::default()).unwrap();
        let facts = vec![primary(kpi::FORWARD_GROWTH_PCT, 40.0)];
        let score = scorer.score_growth_confidence(&facts, as_of());

        // 0.25 * 40 = 10 → 5 stars; confidence 50 + 6*6.5 = 89, minus 3 gaps
        assert_eq!(score.raw_score, 10.0);
        assert_eq!(score.stars.value(), 5);
        assert_eq!(score.data_gaps.len(), 3);
        assert_eq!(score.confidence_pct.value(), 59);
        assert!(score
            .data_gaps
            .iter()
            .all(|g| g.reason == GapReason::TagAbsent));
    }

    #[test]
    fn test_axis_without_inputs() {
        let scorer = AxisScorer::new(ScoringConfig::default()).unwrap();
        let score = scorer.score_momentum(&[], as_of());
        assert_eq!(score.raw_score, 0.0);
        assert_eq!(score.stars.value(), 2);
        assert_eq!(score.confidence_pct.value(), 45);
        assert_eq!(score.data_gaps.len(), 5);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ScoringConfig::default();
        config.star_bands.two_stars = 9.0;
        assert!(matches!(AxisScorer::new(config), Err(ScoringError::Config(_))));
    }
}
