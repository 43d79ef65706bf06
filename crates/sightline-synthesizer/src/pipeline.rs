//! The evaluation pipeline: validation → scoring → overlay → guard → synthesis

use crate::document::{AxisSummary, DecisionDocument};
use crate::synthesis::DecisionSynthesizer;
use crate::{PipelineConfig, SynthesizerError};
use serde::{Deserialize, Serialize};
use sightline_domain::{ColorCategory, DataGap, EvaluationContext, EvidenceCandidate};
use sightline_extractor::{EvidenceSource, Extraction, Extractor};
use sightline_gatekeeper::{Gatekeeper, ValidatedBatch};
use sightline_guard::{kpi as guard_kpi, GuardInputs, NumericGuard, TolerancePreset};
use sightline_overlay::ConfidenceOverlay;
use sightline_scoring::{
    annotate_valuation, evaluate_valuation, resolve_inputs, AxisScorer, ValuationInputs,
};
use tracing::{info, warn};

/// Per-run switches that are not part of the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationOptions {
    /// Run the confidence overlay
    pub use_overlay: bool,
    /// Valuation colour of the previous run, for hysteresis
    pub previous_color: Option<ColorCategory>,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            use_overlay: true,
            previous_color: None,
        }
    }
}

/// Configured evaluation pipeline
///
/// Every stage is a pure function of its inputs, so one `Pipeline` can serve
/// any number of subjects, including from several threads at once.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sightline_domain::{Action, EvaluationContext};
/// use sightline_extractor::EvidenceSource;
/// use sightline_synthesizer::{EvaluationOptions, Pipeline, PipelineConfig};
///
/// let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
/// let records = r#"[2026-09-30][P][momentum] "Guidance raised 20%." (impact: +guidance_revision_pct=20 %) <https://www.sec.gov/x.htm#:~:text=Guidance>"#;
/// let ctx = EvaluationContext::new("ACME", NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
///
/// let doc = pipeline
///     .evaluate_sources(&[EvidenceSource::Records(records.to_string())], &ctx, &EvaluationOptions::default())
///     .unwrap();
/// assert_eq!(doc.validation.accepted, 1);
/// assert!(doc.validation.unparsed.is_empty());
/// assert!(!doc.valuation_available());
/// assert_eq!(doc.decision.action, Action::Go);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    extractor: Extractor,
    gatekeeper: Gatekeeper,
    scorer: AxisScorer,
    overlay: ConfidenceOverlay,
    guard: NumericGuard,
    synthesizer: DecisionSynthesizer,
}

impl Pipeline {
    /// Build a pipeline after validating every configuration section
    pub fn new(config: PipelineConfig) -> Result<Self, SynthesizerError> {
        config.validate().map_err(SynthesizerError::Config)?;
        let scorer =
            AxisScorer::new(config.scoring.clone()).map_err(|e| SynthesizerError::Config(e.to_string()))?;
        Ok(Self {
            extractor: Extractor::new(config.extraction.clone()),
            gatekeeper: Gatekeeper::new(config.validation.clone()),
            scorer,
            overlay: ConfidenceOverlay::new(config.overlay.clone()),
            guard: NumericGuard::new(config.guard.clone()),
            synthesizer: DecisionSynthesizer::new(config.synthesis.clone()),
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Parse evidence sources into candidates
    ///
    /// Any source that cannot be parsed at all fails the call. Individual
    /// lines or entries that were skipped come back in
    /// [`Extraction::skipped`].
    pub fn extract(&self, sources: &[EvidenceSource]) -> Result<Extraction, SynthesizerError> {
        Ok(self.extractor.parse_all(sources)?)
    }

    /// Validate candidates without scoring them
    pub fn validate(&self, candidates: &[EvidenceCandidate]) -> ValidatedBatch {
        self.gatekeeper.validate_batch(candidates)
    }

    /// Parse, then evaluate
    ///
    /// Skipped input counts against the validation pass rate and is listed
    /// in the document's warnings.
    pub fn evaluate_sources(
        &self,
        sources: &[EvidenceSource],
        ctx: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> Result<DecisionDocument, SynthesizerError> {
        let extraction = self.extract(sources)?;
        let mut doc = self.evaluate(&extraction.candidates, ctx, options)?;

        if !extraction.skipped.is_empty() {
            warn!(subject = %ctx.subject, skipped = extraction.skipped.len(), "evidence input skipped");
            doc.validation.record_unparsed(&extraction.skipped);
            doc.warnings.extend(
                extraction
                    .skipped
                    .iter()
                    .map(|skipped| format!("skipped evidence at {}", skipped)),
            );
        }
        Ok(doc)
    }

    /// Evaluate one subject
    ///
    /// Fails only when there is no evidence at all. Rejected records, data
    /// gaps, an unavailable valuation and failing guard checks are all
    /// reported inside the returned document.
    pub fn evaluate(
        &self,
        candidates: &[EvidenceCandidate],
        ctx: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> Result<DecisionDocument, SynthesizerError> {
        if candidates.is_empty() {
            return Err(SynthesizerError::EmptyEvidence);
        }
        info!(subject = %ctx.subject, as_of = %ctx.as_of, candidates = candidates.len(), "evaluating");

        let mut warnings = Vec::new();

        // 1. Validation
        let ValidatedBatch { facts, report } = self.validate(candidates);
        if facts.is_empty() {
            warnings.push("no evidence passed validation".to_string());
        }

        // 2. Axis scoring
        let growth = self.scorer.score_growth_confidence(&facts, ctx.as_of);
        let momentum = self.scorer.score_momentum(&facts, ctx.as_of);

        // 3. Valuation, stage 1 then stage 2
        let rules = self.scorer.rules(ctx.as_of);
        let (valuation_inputs, valuation_resolved) = ValuationInputs::resolve(&facts, rules);
        let valuation_config = &self.config.scoring.valuation;
        let (valuation, valuation_annotation) =
            match evaluate_valuation(&valuation_inputs, options.previous_color, valuation_config) {
                Ok(overlay) => {
                    let annotation =
                        annotate_valuation(&overlay, &valuation_inputs, &facts, valuation_config);
                    (Some(overlay), Some(annotation))
                }
                Err(e) => {
                    warn!(subject = %ctx.subject, "{}", e);
                    warnings.push(e.to_string());
                    (None, None)
                }
            };

        // 4. Confidence overlay
        let (scores, overlay_metrics, overlay_contributed) = if options.use_overlay {
            let outcome = self.overlay.apply(&[growth, momentum], &facts, ctx.as_of);
            let contributed = outcome.contributed();
            (outcome.scores, Some(outcome.metrics), contributed)
        } else {
            (vec![growth, momentum], None, false)
        };
        let (growth, momentum) = match scores.as_slice() {
            [growth, momentum] => (growth, momentum),
            _ => return Err(SynthesizerError::Config("overlay changed the axis count".to_string())),
        };

        // 5. Numerical guard
        let guard_values = resolve_inputs(guard_kpi::GUARD_INPUTS, &facts, rules).values;
        let auto_checks = self.guard.check(
            &GuardInputs::from_kpis(&guard_values),
            TolerancePreset::for_overlay(overlay_contributed),
        );

        // 6. Synthesis
        let decision = self.synthesizer.synthesize(
            growth,
            momentum,
            valuation.as_ref(),
            &auto_checks,
            ctx.as_of,
        );

        let neutral_point = self.config.scoring.neutral_point;
        let axes = scores
            .iter()
            .map(|s| AxisSummary::from_score(s, valuation.as_ref(), neutral_point))
            .collect();
        let data_gaps: Vec<DataGap> = scores
            .iter()
            .flat_map(|s| s.data_gaps.iter().cloned())
            .chain(valuation_resolved.gaps)
            .collect();

        info!(
            subject = %ctx.subject,
            action = decision.action.as_str(),
            index = decision.decision_index,
            gaps = data_gaps.len(),
            "evaluation complete"
        );

        Ok(DecisionDocument {
            subject: ctx.subject.clone(),
            evaluated_on: ctx.as_of,
            axes,
            valuation,
            valuation_annotation,
            decision,
            auto_checks,
            validation: report,
            overlay: overlay_metrics,
            data_gaps,
            warnings,
        })
    }
}
