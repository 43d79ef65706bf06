//! Axis scoring and valuation over a realistic fact set.

use chrono::NaiveDate;
use sightline_domain::{
    AxisId, ColorCategory, DualAnchorStatus, EvidenceFact, FactId, GapReason, Locator, Polarity,
    ProvenanceTier,
};
use sightline_scoring::{evaluate_valuation, kpi, AxisScorer, ScoringConfig, ValuationInputs};

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()
}

fn fact(kpi: &str, value: f64, tier: ProvenanceTier, axis: AxisId) -> EvidenceFact {
    let asof = NaiveDate::from_ymd_opt(2026, 9, 30).unwrap();
    let url = format!("https://www.sec.gov/{}.htm#:~:text={}", kpi, kpi);
    let excerpt = format!("{} was {}.", kpi, value);
    EvidenceFact {
        id: FactId::derive(kpi, asof, &url, &excerpt),
        asof,
        tier,
        axis_tag: axis,
        excerpt,
        locator: Locator::TextFragment {
            url,
            fragment: kpi.to_string(),
        },
        kpi_key: kpi.to_string(),
        numeric_value: Some(value),
        unit: String::new(),
        ttl_days: 30,
        contradiction_flag: false,
        polarity: Polarity::Neutral,
        credence: 90,
        anchor_status: DualAnchorStatus::Confirmed,
        source_domains: vec!["sec.gov".to_string()],
    }
}

fn primary(kpi: &str, value: f64, axis: AxisId) -> EvidenceFact {
    fact(kpi, value, ProvenanceTier::Primary, axis)
}

#[test]
fn test_growth_axis_with_every_input() {
    let scorer = AxisScorer::new(ScoringConfig::default()).unwrap();
    let facts = vec![
        primary(kpi::FORWARD_GROWTH_PCT, 20.0, AxisId::GrowthConfidence),
        primary(kpi::MARGIN_DELTA_PP, 2.0, AxisId::GrowthConfidence),
        primary(kpi::DILUTION_PCT, 1.0, AxisId::GrowthConfidence),
        primary(kpi::CAPEX_INTENSITY_PCT, 5.0, AxisId::GrowthConfidence),
    ];

    let score = scorer.score_growth_confidence(&facts, as_of());
    // 0.25*20 + 0.5*2 - 0.5*1 - 0.2*5
    assert!((score.raw_score - 4.5).abs() < 1e-9);
    assert_eq!(score.stars.value(), 3);
    assert_eq!(score.confidence_pct.value(), 56);
    assert!(score.data_gaps.is_empty());
    assert_eq!(score.supporting_facts.len(), 4);
}

#[test]
fn test_momentum_gaps_lower_confidence() {
    let scorer = AxisScorer::new(ScoringConfig::default()).unwrap();
    let facts = vec![primary(kpi::GUIDANCE_REVISION_PCT, 10.0, AxisId::Momentum)];

    let score = scorer.score_momentum(&facts, as_of());
    assert!((score.raw_score - 3.0).abs() < 1e-9);
    assert_eq!(score.stars.value(), 3);
    assert_eq!(score.data_gaps.len(), 4);
    assert!(score
        .data_gaps
        .iter()
        .all(|g| g.reason == GapReason::TagAbsent));
    assert_eq!(score.confidence_pct.value(), 45);
}

#[test]
fn test_secondary_fact_is_not_disclosed() {
    let scorer = AxisScorer::new(ScoringConfig::default()).unwrap();
    let facts = vec![fact(
        kpi::GUIDANCE_REVISION_PCT,
        10.0,
        ProvenanceTier::Secondary,
        AxisId::Momentum,
    )];

    let score = scorer.score_momentum(&facts, as_of());
    assert_eq!(score.raw_score, 0.0);
    let gap = score
        .data_gaps
        .iter()
        .find(|g| g.input == kpi::GUIDANCE_REVISION_PCT)
        .unwrap();
    assert_eq!(gap.reason, GapReason::NotDisclosed);
}

#[test]
fn test_valuation_from_facts() {
    let scorer = AxisScorer::new(ScoringConfig::default()).unwrap();
    let facts = vec![
        primary(kpi::ACTUAL_MULTIPLE, 20.0, AxisId::Valuation),
        primary(kpi::PEER_MEDIAN_MULTIPLE, 25.0, AxisId::Valuation),
        primary(kpi::FORWARD_GROWTH_PCT, 22.0, AxisId::GrowthConfidence),
        primary(kpi::OPERATING_MARGIN_PCT, 18.0, AxisId::Valuation),
    ];

    let (inputs, _) = ValuationInputs::resolve(&facts, scorer.rules(as_of()));
    let overlay = evaluate_valuation(&inputs, None, &scorer.config().valuation).unwrap();

    // model row: growth >= 20 and margin >= 15 -> 28; fair = max(25, 28)
    assert_eq!(overlay.model_implied_multiple, Some(28.0));
    assert_eq!(overlay.fair_value_basis, 28.0);
    assert!((overlay.discount_pct - 8.0 / 28.0).abs() < 1e-9);
    assert_eq!(overlay.color_category, ColorCategory::Red);
    assert_eq!(overlay.multiplier, 0.75);
}

#[test]
fn test_valuation_unavailable_without_actual_multiple() {
    let scorer = AxisScorer::new(ScoringConfig::default()).unwrap();
    let facts = vec![primary(kpi::PEER_MEDIAN_MULTIPLE, 25.0, AxisId::Valuation)];

    let (inputs, resolved) = ValuationInputs::resolve(&facts, scorer.rules(as_of()));
    assert!(evaluate_valuation(&inputs, None, &scorer.config().valuation).is_err());
    assert!(resolved.gaps.iter().any(|g| g.input == kpi::ACTUAL_MULTIPLE));
}

#[test]
fn test_valuation_gaps_cover_required_inputs_only() {
    let scorer = AxisScorer::new(ScoringConfig::default()).unwrap();

    let (inputs, resolved) = ValuationInputs::resolve(&[], scorer.rules(as_of()));
    assert_eq!(inputs, ValuationInputs::default());
    let gaps: Vec<&str> = resolved.gaps.iter().map(|g| g.input.as_str()).collect();
    assert_eq!(gaps, kpi::VALUATION_INPUTS);
    assert!(!gaps.contains(&kpi::IMPLIED_GROWTH_PCT));
}
