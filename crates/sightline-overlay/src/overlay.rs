//! Admission filter and bounded adjustment

use crate::{AdmissionRejection, OverlayConfig, OverlayError, OverlayMetrics};
use chrono::NaiveDate;
use sightline_domain::{
    AxisScore, DualAnchorStatus, EvidenceFact, FactId, OverlayDelta, ProvenanceTier,
};
use tracing::{debug, info};

/// Result of one overlay pass
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayOutcome {
    /// Adjusted scores, in input order
    pub scores: Vec<AxisScore>,
    /// Admission metrics
    pub metrics: OverlayMetrics,
}

impl OverlayOutcome {
    /// Whether any axis score was changed
    pub fn contributed(&self) -> bool {
        self.scores.iter().any(|s| s.overlay_applied)
    }
}

/// Second pass that lets short-lived SECONDARY evidence nudge axis scores
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sightline_overlay::ConfidenceOverlay;
///
/// let overlay = ConfidenceOverlay::default_config();
/// let as_of = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
/// let outcome = overlay.apply(&[], &[], as_of);
/// assert!(!outcome.contributed());
/// ```
#[derive(Debug, Clone)]
pub struct ConfidenceOverlay {
    config: OverlayConfig,
}

impl ConfidenceOverlay {
    /// Create a new overlay with the given configuration
    pub fn new(config: OverlayConfig) -> Self {
        Self { config }
    }

    /// Create an overlay after checking the configuration
    pub fn try_new(config: OverlayConfig) -> Result<Self, OverlayError> {
        config.validate().map_err(OverlayError::Config)?;
        Ok(Self::new(config))
    }

    /// Create an overlay with default configuration
    pub fn default_config() -> Self {
        Self::new(OverlayConfig::default())
    }

    /// Get the configuration
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Check one fact against the admission filter
    pub fn admit(&self, fact: &EvidenceFact, as_of: NaiveDate) -> Result<(), AdmissionRejection> {
        if fact.tier != ProvenanceTier::Secondary {
            return Err(AdmissionRejection::NotSecondary);
        }
        if fact.contradiction_flag {
            return Err(AdmissionRejection::Contradicted);
        }
        if fact.credence < self.config.min_credence {
            return Err(AdmissionRejection::LowCredence);
        }

        let remaining = fact.remaining_ttl_days(as_of);
        if remaining < 0 {
            return Err(AdmissionRejection::Expired);
        }
        let window = if fact.anchor_status == DualAnchorStatus::Pending {
            self.config.pending_max_remaining_ttl_days
        } else {
            self.config.max_remaining_ttl_days
        };
        if remaining > window {
            return Err(AdmissionRejection::TtlTooLong);
        }

        Ok(())
    }

    /// Star and confidence delta for a signed net count of admitted facts
    ///
    /// Non-decreasing in |net|; the sign follows the net count.
    pub fn delta_for(&self, net: i64) -> (i32, i32) {
        let (stars, confidence) = match net.unsigned_abs() {
            0 => (0, 0),
            1 => (
                self.config.single_fact_stars,
                self.config.single_fact_confidence_pp,
            ),
            _ => (
                self.config.multi_fact_stars,
                self.config.multi_fact_confidence_pp,
            ),
        };
        let sign = net.signum() as i32;
        (sign * stars, sign * confidence)
    }

    /// Apply the overlay to axis scores
    ///
    /// Each score is recomputed from its base stars and confidence, so applying
    /// the overlay again with the same pool yields the same result.
    pub fn apply(&self, scores: &[AxisScore], pool: &[EvidenceFact], as_of: NaiveDate) -> OverlayOutcome {
        let mut metrics = OverlayMetrics::new();
        let mut admitted: Vec<&EvidenceFact> = Vec::new();

        for fact in pool.iter().filter(|f| f.tier == ProvenanceTier::Secondary) {
            match self.admit(fact, as_of) {
                Ok(()) => {
                    debug!(fact_id = %fact.id, axis = %fact.axis_tag, "overlay admitted fact");
                    metrics.record_admission(fact.axis_tag);
                    admitted.push(fact);
                }
                Err(reason) => {
                    debug!(fact_id = %fact.id, ?reason, "overlay rejected fact");
                    metrics.record_rejection(reason);
                }
            }
        }

        let scores: Vec<AxisScore> = scores
            .iter()
            .map(|score| {
                let adjusted = self.adjust(score, &admitted);
                if adjusted.overlay_applied {
                    metrics.record_adjustment();
                }
                adjusted
            })
            .collect();

        info!(
            admitted = metrics.total_admitted(),
            rejected = metrics.total_rejected(),
            adjusted_axes = metrics.adjusted_axes,
            "confidence overlay applied"
        );

        OverlayOutcome { scores, metrics }
    }

    fn adjust(&self, score: &AxisScore, admitted: &[&EvidenceFact]) -> AxisScore {
        let for_axis: Vec<&EvidenceFact> = admitted
            .iter()
            .copied()
            .filter(|f| f.axis_tag == score.axis_id)
            .collect();
        let net: i64 = for_axis.iter().map(|f| i64::from(f.polarity.signum())).sum();
        let (stars_delta, confidence_delta) = self.delta_for(net);

        let mut adjusted = score.clone();
        adjusted.stars = score.base_stars.offset(stars_delta);
        adjusted.confidence_pct = score.base_confidence_pct.offset(confidence_delta);
        adjusted.overlay_applied = adjusted.stars != score.base_stars
            || adjusted.confidence_pct != score.base_confidence_pct;
        adjusted.overlay = Some(OverlayDelta {
            stars: stars_delta,
            confidence_pp: confidence_delta,
            admitted: for_axis.iter().map(|f| f.id).collect::<Vec<FactId>>(),
        });

        if adjusted.overlay_applied {
            info!(
                axis = %score.axis_id,
                net,
                stars = adjusted.stars.value(),
                confidence = adjusted.confidence_pct.value(),
                "overlay adjusted axis"
            );
        }
        adjusted
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn delta_is_monotonic_in_count(n1 in 0i64..10, extra in 0i64..10, negative in proptest::bool::ANY) {
            let overlay = ConfidenceOverlay::default_config();
            let sign = if negative { -1 } else { 1 };
            let (s1, c1) = overlay.delta_for(sign * n1);
            let (s2, c2) = overlay.delta_for(sign * (n1 + extra));
            prop_assert!(s2.abs() >= s1.abs());
            prop_assert!(c2.abs() >= c1.abs());
        }

        #[test]
        fn adjusted_scores_stay_in_bounds(stars in 1u8..=5, confidence in 45u8..=95, net in -5i64..5) {
            let overlay = ConfidenceOverlay::default_config();
            let (ds, dc) = overlay.delta_for(net);
            let stars = sightline_domain::Stars::new(stars).unwrap().offset(ds).value();
            let confidence = sightline_domain::ConfidencePct::new(confidence).unwrap().offset(dc).value();
            prop_assert!((1..=5).contains(&stars));
            prop_assert!((45..=95).contains(&confidence));
        }
    }
}
