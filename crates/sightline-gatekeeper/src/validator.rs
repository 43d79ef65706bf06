//! Evidence validation logic

use crate::locator::resolve_locator;
use crate::provenance::assign_tier;
use crate::{GatekeeperError, ValidationConfig, ValidationReport};
use serde::{Deserialize, Serialize};
use sightline_domain::evidence::excerpt_word_count;
use sightline_domain::{
    EvidenceCandidate, EvidenceFact, FactId, ProvenanceTier, ValidationFailure, ValidationWarning,
};
use tracing::{debug, info, warn};

/// Result of validating one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Whether the record passed validation
    pub status: ValidationStatus,

    /// Failure kind, for rejected records
    pub failure: Option<ValidationFailure>,

    /// Non-fatal findings on accepted records
    pub warnings: Vec<ValidationWarning>,

    /// Detail of the failure
    pub detail: Option<String>,

    /// Tier assigned from the record's sourcing (accepted records only)
    pub assigned_tier: Option<ProvenanceTier>,
}

impl ValidationResult {
    fn rejected(failure: ValidationFailure, detail: String) -> Self {
        Self {
            status: ValidationStatus::Rejected,
            failure: Some(failure),
            warnings: Vec::new(),
            detail: Some(detail),
            assigned_tier: None,
        }
    }

    /// Whether the record was accepted
    pub fn is_accepted(&self) -> bool {
        self.status == ValidationStatus::Accepted
    }
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    /// Record accepted
    Accepted,

    /// Record rejected
    Rejected,
}

/// A validated fact (when accepted) together with its result
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    /// The validated fact, present only for accepted records
    pub fact: Option<EvidenceFact>,
    /// The validation result
    pub result: ValidationResult,
}

/// Facts accepted from a batch, in input order, plus the batch report
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedBatch {
    /// Accepted facts
    pub facts: Vec<EvidenceFact>,
    /// Report over the whole batch
    pub report: ValidationReport,
}

/// The Gatekeeper validates evidence records before they reach scoring
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper after checking the configuration
    pub fn try_new(config: ValidationConfig) -> Result<Self, GatekeeperError> {
        config.validate().map_err(GatekeeperError::Config)?;
        Ok(Self::new(config))
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Get the configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate one record
    ///
    /// Checks run in a fixed order and stop at the first failure: excerpt
    /// length, then the anchor. Accepted records get a tier assigned from
    /// their sourcing; the claimed tier only produces a warning when it
    /// overstates that sourcing.
    pub fn validate(&self, candidate: &EvidenceCandidate) -> ValidationOutcome {
        // 1. Excerpt length
        let words = excerpt_word_count(&candidate.excerpt);
        if words > self.config.max_excerpt_words {
            return ValidationOutcome {
                fact: None,
                result: ValidationResult::rejected(
                    ValidationFailure::InvalidExcerptLength,
                    format!(
                        "excerpt has {} words (max {})",
                        words, self.config.max_excerpt_words
                    ),
                ),
            };
        }

        // 2. Anchor
        let anchor = match resolve_locator(candidate, &self.config) {
            Ok(anchor) => anchor,
            Err((failure, detail)) => {
                return ValidationOutcome {
                    fact: None,
                    result: ValidationResult::rejected(failure, detail),
                }
            }
        };

        // 3. Tier
        let sourcing = assign_tier(&anchor.host, &candidate.corroborating_urls, &self.config);
        let mut warnings = Vec::new();
        if candidate.claimed_tier > sourcing.tier {
            warnings.push(ValidationWarning::TierDowngraded);
        }
        if candidate.contradiction_flag {
            warnings.push(ValidationWarning::ContradictoryEvidence);
        }

        let fact = EvidenceFact {
            id: FactId::derive(
                &candidate.kpi_key,
                candidate.asof,
                anchor.locator.url(),
                &candidate.excerpt,
            ),
            asof: candidate.asof,
            tier: sourcing.tier,
            axis_tag: candidate.axis_tag,
            excerpt: candidate.excerpt.trim().to_string(),
            locator: anchor.locator,
            kpi_key: candidate.kpi_key.clone(),
            numeric_value: candidate.numeric_value.filter(|v| v.is_finite()),
            unit: candidate.unit.clone(),
            ttl_days: candidate.ttl_days.unwrap_or(self.config.default_ttl_days),
            contradiction_flag: candidate.contradiction_flag,
            polarity: candidate.polarity,
            credence: candidate.credence.unwrap_or(self.config.default_credence).min(100),
            anchor_status: candidate.anchor_status,
            source_domains: sourcing.domains,
        };

        debug!(
            kpi = %fact.kpi_key,
            tier = %fact.tier,
            fact_id = %fact.id,
            "accepted evidence"
        );

        ValidationOutcome {
            fact: Some(fact),
            result: ValidationResult {
                status: ValidationStatus::Accepted,
                failure: None,
                warnings,
                detail: None,
                assigned_tier: Some(sourcing.tier),
            },
        }
    }

    /// Validate a batch, keeping accepted facts in input order
    pub fn validate_batch(&self, candidates: &[EvidenceCandidate]) -> ValidatedBatch {
        let mut batch = ValidatedBatch::default();

        for (index, candidate) in candidates.iter().enumerate() {
            let outcome = self.validate(candidate);
            match (outcome.fact, outcome.result.failure) {
                (Some(fact), _) => {
                    batch.report.record_accepted(&outcome.result.warnings);
                    batch.facts.push(fact);
                }
                (None, Some(failure)) => {
                    let detail = outcome.result.detail.unwrap_or_default();
                    warn!(
                        "Rejected evidence {} ({}): {} - {}",
                        index, candidate.kpi_key, failure, detail
                    );
                    batch
                        .report
                        .record_rejected(index, &candidate.kpi_key, failure, detail);
                }
                (None, None) => {}
            }
        }

        info!("Validated evidence: {}", batch.report.summary());
        batch
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use sightline_domain::{AxisId, Locator, RawLocator};

    proptest! {
        #[test]
        fn accepted_facts_respect_excerpt_and_anchor(
            word_count in 0usize..40,
            fragment in proptest::bool::ANY,
            page in proptest::option::of(0u32..5),
        ) {
            let excerpt = vec!["w"; word_count].join(" ");
            let url = if fragment {
                "https://www.sec.gov/x.htm#:~:text=w".to_string()
            } else {
                "https://ir.example.com/report.pdf".to_string()
            };
            let mut locator = RawLocator::url(url);
            locator.page = page;
            let candidate = EvidenceCandidate::new(
                NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                ProvenanceTier::Secondary,
                AxisId::GrowthConfidence,
                excerpt,
                "forward_growth_pct",
                locator,
            );

            let outcome = Gatekeeper::default_config().validate(&candidate);
            if let Some(fact) = outcome.fact {
                prop_assert!(fact.word_count() <= 25);
                match fact.locator {
                    Locator::TextFragment { ref fragment, .. } => prop_assert!(!fragment.is_empty()),
                    Locator::Backup { page, ref quote, ref content_hash, .. } => {
                        prop_assert!(page.unwrap_or(0) >= 1);
                        prop_assert!(!quote.is_empty());
                        prop_assert!(content_hash.starts_with("sha256:"));
                    }
                }
            }
        }
    }
}
