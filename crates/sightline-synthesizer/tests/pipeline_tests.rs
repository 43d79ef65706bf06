//! End-to-end tests for the evaluation pipeline

use chrono::NaiveDate;
use proptest::prelude::*;
use sightline_domain::{
    Action, AxisId, ColorCategory, DecisionRecord, EvaluationContext, EvidenceCandidate,
    EvidenceFact, Polarity, ProvenanceTier, RawLocator, ValidationFailure,
};
use sightline_extractor::{EvidenceSource, ExtractorError};
use sightline_synthesizer::{
    DecisionDocument, EvaluationOptions, Pipeline, PipelineConfig, SynthesizerError,
};

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()
}

fn ctx() -> EvaluationContext {
    EvaluationContext::new("ACME", as_of())
}

fn pipeline() -> Pipeline {
    Pipeline::new(PipelineConfig::default()).unwrap()
}

/// PRIMARY-sourced numeric fact
fn filing(axis: AxisId, kpi: &str, value: f64) -> EvidenceCandidate {
    EvidenceCandidate::new(
        NaiveDate::from_ymd_opt(2026, 9, 30).unwrap(),
        ProvenanceTier::Primary,
        axis,
        format!("The company reported {} of {}.", kpi, value),
        kpi,
        RawLocator::url(format!(
            "https://www.sec.gov/Archives/acme-10q.htm#:~:text={}",
            kpi
        )),
    )
    .with_value(value, "")
}

/// Short-lived single-source news item
fn news(axis: AxisId, name: &str, polarity: Polarity) -> EvidenceCandidate {
    let mut candidate = EvidenceCandidate::new(
        NaiveDate::from_ymd_opt(2026, 9, 30).unwrap(),
        ProvenanceTier::Secondary,
        axis,
        format!("Channel checks point to {} demand.", name),
        format!("channel_check_{}", name),
        RawLocator::url(format!(
            "https://www.trade-press.example.com/{}#:~:text=Channel%20checks",
            name
        )),
    );
    candidate.polarity = polarity;
    candidate.ttl_days = Some(10);
    candidate.credence = Some(70);
    candidate
}

/// Momentum 4 stars, growth confidence 3 stars, valuation GREEN
fn go_snapshot() -> Vec<EvidenceCandidate> {
    vec![
        filing(AxisId::Momentum, "guidance_revision_pct", 14.0),
        filing(AxisId::Momentum, "margin_delta_pp", 1.0),
        filing(AxisId::Momentum, "composite_health_score", 75.0),
        filing(AxisId::GrowthConfidence, "forward_growth_pct", 12.0),
        filing(AxisId::Valuation, "actual_multiple", 24.0),
        filing(AxisId::Valuation, "peer_median_multiple", 25.0),
        filing(AxisId::Valuation, "operating_margin_pct", 10.0),
    ]
}

fn words(n: usize) -> String {
    (0..n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
}

#[test]
fn test_momentum_raw_six_point_two_is_four_stars() {
    let doc = pipeline()
        .evaluate(&go_snapshot(), &ctx(), &EvaluationOptions::default())
        .unwrap();

    let momentum = &doc.decision.contributing_axis_scores[1];
    assert_eq!(momentum.axis_id, AxisId::Momentum);
    assert!((momentum.raw_score - 6.2).abs() < 1e-9);
    assert_eq!(momentum.stars.value(), 4);
    assert_eq!(doc.axis(AxisId::Momentum).unwrap().stars, 4);
}

#[test]
fn test_twelve_percent_discount_is_amber() {
    let candidates = vec![
        filing(AxisId::Valuation, "actual_multiple", 22.0),
        filing(AxisId::Valuation, "peer_median_multiple", 25.0),
        filing(AxisId::GrowthConfidence, "forward_growth_pct", 12.0),
        filing(AxisId::Valuation, "operating_margin_pct", 10.0),
    ];
    let doc = pipeline()
        .evaluate(&candidates, &ctx(), &EvaluationOptions::default())
        .unwrap();

    let valuation = doc.valuation.as_ref().unwrap();
    assert!((valuation.discount_pct - 0.12).abs() < 1e-9);
    assert_eq!(valuation.color_category, ColorCategory::Amber);
    assert_eq!(valuation.multiplier, 0.90);
    assert_eq!(valuation.model_implied_multiple, Some(20.0));
    assert_eq!(valuation.fair_value_basis, 25.0);
    assert_eq!(doc.decision.valuation_multiplier, 0.90);
    assert!(doc.valuation_annotation.is_some());
}

#[test]
fn test_zero_admitted_overlay_facts_leave_scores_unchanged() {
    let doc = pipeline()
        .evaluate(&go_snapshot(), &ctx(), &EvaluationOptions::default())
        .unwrap();

    let metrics = doc.overlay.as_ref().unwrap();
    assert_eq!(metrics.total_admitted(), 0);
    for score in &doc.decision.contributing_axis_scores {
        let delta = score.overlay.as_ref().unwrap();
        assert_eq!(delta.stars, 0);
        assert_eq!(delta.confidence_pp, 0);
        assert_eq!(score.stars, score.base_stars);
        assert_eq!(score.confidence_pct, score.base_confidence_pct);
    }
}

#[test]
fn test_go_decision_from_four_and_three_stars_with_green() {
    let doc = pipeline()
        .evaluate(&go_snapshot(), &ctx(), &EvaluationOptions::default())
        .unwrap();

    assert_eq!(doc.axis(AxisId::GrowthConfidence).unwrap().stars, 3);
    assert_eq!(doc.axis(AxisId::Momentum).unwrap().stars, 4);
    assert_eq!(doc.decision.color_category, Some(ColorCategory::Green));
    assert!((doc.decision.decision_index - 0.756).abs() < 1e-9);
    assert_eq!(doc.decision.action, Action::Go);
    assert_eq!(doc.decision.size_pct, 15.0);
    assert!(doc.axes.iter().all(|a| a.market_embedded_flag));
    assert!(doc.auto_checks.passed);
}

#[test]
fn test_thirty_word_excerpt_rejected_and_reported() {
    let mut candidates = go_snapshot();
    let mut long = filing(AxisId::Momentum, "guidance_revision_pct", 90.0);
    long.excerpt = words(30);
    candidates.push(long);

    let doc = pipeline()
        .evaluate(&candidates, &ctx(), &EvaluationOptions::default())
        .unwrap();

    assert_eq!(doc.validation.total, 8);
    assert_eq!(doc.validation.accepted, 7);
    assert_eq!(doc.validation.rejected.len(), 1);
    assert_eq!(doc.validation.rejected[0].index, 7);
    assert_eq!(
        doc.validation.rejected[0].failure,
        ValidationFailure::InvalidExcerptLength
    );
    assert_eq!(
        doc.validation.failures_of(ValidationFailure::InvalidExcerptLength),
        1
    );

    // The rejected 90% revision never reaches the momentum formula
    let momentum = &doc.decision.contributing_axis_scores[1];
    assert!((momentum.raw_score - 6.2).abs() < 1e-9);
}

#[test]
fn test_same_snapshot_gives_byte_identical_output() {
    let pipeline = pipeline();
    let first = pipeline
        .evaluate(&go_snapshot(), &ctx(), &EvaluationOptions::default())
        .unwrap();
    let second = pipeline
        .evaluate(&go_snapshot(), &ctx(), &EvaluationOptions::default())
        .unwrap();

    assert_eq!(
        serde_json::to_string(&first.decision).unwrap(),
        serde_json::to_string(&second.decision).unwrap()
    );
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn test_serde_round_trip_preserves_records() {
    let pipeline = pipeline();
    let doc = pipeline
        .evaluate(&go_snapshot(), &ctx(), &EvaluationOptions::default())
        .unwrap();

    let json = serde_json::to_string(&doc.decision).unwrap();
    let decision: DecisionRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(decision, doc.decision);

    let json = doc.to_json().unwrap();
    let reloaded: DecisionDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded, doc);

    let batch = pipeline.validate(&go_snapshot());
    for fact in &batch.facts {
        let json = serde_json::to_string(fact).unwrap();
        let reloaded: EvidenceFact = serde_json::from_str(&json).unwrap();
        assert_eq!(&reloaded, fact);
    }
}

#[test]
fn test_secondary_news_moves_axis_and_relaxes_guard() {
    let mut candidates = go_snapshot();
    candidates.push(news(AxisId::GrowthConfidence, "strong", Polarity::Positive));

    let doc = pipeline()
        .evaluate(&candidates, &ctx(), &EvaluationOptions::default())
        .unwrap();

    let growth = doc.axis(AxisId::GrowthConfidence).unwrap();
    assert_eq!(growth.stars, 4);
    assert!(growth.overlay_applied);
    assert_eq!(doc.overlay.as_ref().unwrap().total_admitted(), 1);
    assert_eq!(
        doc.auto_checks.preset,
        sightline_guard::TolerancePreset::OverlayAdmitted
    );

    let without = pipeline()
        .evaluate(
            &candidates,
            &ctx(),
            &EvaluationOptions {
                use_overlay: false,
                previous_color: None,
            },
        )
        .unwrap();
    assert_eq!(without.axis(AxisId::GrowthConfidence).unwrap().stars, 3);
    assert_eq!(without.auto_checks.preset, sightline_guard::TolerancePreset::Core);
}

#[test]
fn test_secondary_facts_never_feed_axis_inputs() {
    let mut candidates = go_snapshot();
    let mut rumour = news(AxisId::Momentum, "rumour", Polarity::Positive);
    rumour.kpi_key = "order_backlog_growth_pct".to_string();
    rumour.numeric_value = Some(80.0);
    candidates.push(rumour);

    let doc = pipeline()
        .evaluate(&candidates, &ctx(), &EvaluationOptions::default())
        .unwrap();
    let momentum = &doc.decision.contributing_axis_scores[1];
    assert!((momentum.raw_score - 6.2).abs() < 1e-9);
    assert!(momentum
        .data_gaps
        .iter()
        .any(|g| g.input == "order_backlog_growth_pct"));
}

#[test]
fn test_guard_failure_reported_not_fatal() {
    let mut candidates = go_snapshot();
    candidates.push(filing(AxisId::GrowthConfidence, "gross_margin_pct", 45.0));
    candidates.push(filing(AxisId::GrowthConfidence, "guided_gross_margin_pct", 40.0));

    let doc = pipeline()
        .evaluate(&candidates, &ctx(), &EvaluationOptions::default())
        .unwrap();

    assert!(!doc.auto_checks.passed);
    assert_eq!(doc.auto_checks.messages.len(), 1);
    assert_eq!(doc.decision.action, Action::Go);
    assert!(doc
        .decision
        .rationale
        .iter()
        .any(|r| r.contains("MARGIN_DEVIATION")));
}

#[test]
fn test_previous_colour_holds_within_hysteresis() {
    let candidates = vec![
        filing(AxisId::Valuation, "actual_multiple", 22.25),
        filing(AxisId::Valuation, "peer_median_multiple", 25.0),
    ];
    let fresh = pipeline()
        .evaluate(&candidates, &ctx(), &EvaluationOptions::default())
        .unwrap();
    assert_eq!(fresh.valuation.as_ref().unwrap().color_category, ColorCategory::Amber);

    let held = pipeline()
        .evaluate(
            &candidates,
            &ctx(),
            &EvaluationOptions {
                use_overlay: true,
                previous_color: Some(ColorCategory::Green),
            },
        )
        .unwrap();
    let valuation = held.valuation.as_ref().unwrap();
    assert_eq!(valuation.color_category, ColorCategory::Green);
    assert!(valuation.hysteresis_held);
}

#[test]
fn test_records_and_store_sources() {
    let records = concat!(
        "# quarterly filing\n",
        "[2026-09-30][P][momentum] \"Guidance raised 14%.\" (impact: +guidance_revision_pct=14 %) <https://www.sec.gov/x.htm#:~:text=Guidance>\n",
    );
    let store = r#"{"CONFIRMED": [{"kpi": "composite_health_score", "value": 75, "unit": "",
        "asof": "2026-09-30", "tag": "PRIMARY/momentum", "url": "https://www.sec.gov/y.htm#:~:text=health",
        "excerpt": "Composite health score of 75."}]}"#;

    let doc = pipeline()
        .evaluate_sources(
            &[
                EvidenceSource::Records(records.to_string()),
                EvidenceSource::Store(store.to_string()),
            ],
            &ctx(),
            &EvaluationOptions::default(),
        )
        .unwrap();
    assert_eq!(doc.validation.accepted, 2);
    let momentum = &doc.decision.contributing_axis_scores[1];
    assert!((momentum.raw_score - 5.2).abs() < 1e-9);
}

#[test]
fn test_unparseable_source_is_an_error() {
    let result = pipeline().evaluate_sources(
        &[EvidenceSource::Records("   \n# nothing here\n".to_string())],
        &ctx(),
        &EvaluationOptions::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_axis_without_evidence_is_named_in_rationale() {
    let records = "[2026-09-30][P][momentum] \"Guidance raised 14%.\" (impact: +guidance_revision_pct=14 %) <https://www.sec.gov/x.htm#:~:text=Guidance>";
    let doc = pipeline()
        .evaluate_sources(
            &[EvidenceSource::Records(records.to_string())],
            &ctx(),
            &EvaluationOptions::default(),
        )
        .unwrap();

    let growth = &doc.decision.contributing_axis_scores[0];
    assert_eq!(growth.axis_id, AxisId::GrowthConfidence);
    assert!(growth.supporting_facts.is_empty());
    assert_eq!(growth.stars.value(), 2);
    assert!(doc
        .decision
        .rationale
        .iter()
        .any(|r| r.starts_with("growth_confidence had no usable evidence") && r.contains("2/5")));
    assert!(!doc
        .decision
        .rationale
        .iter()
        .any(|r| r.starts_with("momentum had no usable evidence")));
}

#[test]
fn test_corrupt_store_fails_even_with_valid_records() {
    let records = "[2026-09-30][P][momentum] \"Guidance raised 14%.\" (impact: +guidance_revision_pct=14 %) <https://www.sec.gov/x.htm#:~:text=Guidance>";
    let result = pipeline().evaluate_sources(
        &[
            EvidenceSource::Records(records.to_string()),
            EvidenceSource::Store("{corrupt".to_string()),
        ],
        &ctx(),
        &EvaluationOptions::default(),
    );
    assert!(matches!(
        result,
        Err(SynthesizerError::Extractor(ExtractorError::JsonParse(_)))
    ));
}

#[test]
fn test_skipped_line_is_reported_in_document() {
    let records = concat!(
        "[2026-09-30][P][momentum] \"Guidance raised 14%.\" (impact: +guidance_revision_pct=14 %) <https://www.sec.gov/x.htm#:~:text=Guidance>\n",
        "[2026-13-45][P][momentum] \"Orders rose 18%.\" (impact: +order_backlog_growth_pct=18 %) <https://www.sec.gov/x.htm#:~:text=Orders>\n",
    );

    let doc = pipeline()
        .evaluate_sources(
            &[EvidenceSource::Records(records.to_string())],
            &ctx(),
            &EvaluationOptions::default(),
        )
        .unwrap();

    assert_eq!(doc.validation.accepted, 1);
    assert_eq!(doc.validation.total, 2);
    assert_eq!(doc.validation.unparsed.len(), 1);
    assert_eq!(doc.validation.unparsed[0].location, "source 1, line 2");
    assert!((doc.validation.pass_rate - 0.5).abs() < 1e-9);
    assert!(doc
        .warnings
        .iter()
        .any(|w| w.contains("source 1, line 2") && w.contains("2026-13-45")));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn red_valuation_caps_decision_index(
        revision in -20.0f64..60.0,
        growth in -10.0f64..60.0,
        actual in 32.0f64..200.0,
    ) {
        let candidates = vec![
            filing(AxisId::Momentum, "guidance_revision_pct", revision),
            filing(AxisId::GrowthConfidence, "forward_growth_pct", growth),
            filing(AxisId::Valuation, "actual_multiple", actual),
            filing(AxisId::Valuation, "peer_median_multiple", 20.0),
        ];
        let doc = pipeline()
            .evaluate(&candidates, &ctx(), &EvaluationOptions::default())
            .unwrap();
        if doc.decision.color_category == Some(ColorCategory::Red) {
            prop_assert!(doc.decision.decision_index <= 0.55);
        }
        for score in &doc.decision.contributing_axis_scores {
            prop_assert!((1..=5).contains(&score.stars.value()));
            prop_assert!((45..=95).contains(&score.confidence_pct.value()));
        }
    }
}
