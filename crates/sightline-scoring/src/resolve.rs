//! Resolve formula inputs from validated evidence

use chrono::NaiveDate;
use sightline_domain::{DataGap, EvidenceFact, FactId, GapReason, KpiInputs, ProvenanceTier};
use tracing::debug;

/// Inputs resolved for one axis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedInputs {
    /// Values found, by KPI key
    pub values: KpiInputs,
    /// Facts the values came from, in input order
    pub supporting: Vec<FactId>,
    /// Inputs that could not be sourced
    pub gaps: Vec<DataGap>,
}

/// Rules applied while resolving inputs
#[derive(Debug, Clone, Copy)]
pub struct ResolutionRules {
    /// Evaluation date used for TTL expiry
    pub as_of: NaiveDate,
    /// Lowest tier allowed to feed an input
    pub min_tier: ProvenanceTier,
    /// Re-check window recorded on gaps
    pub recheck_ttl_days: u32,
}

/// Resolve each key to the value of its best qualifying fact
///
/// A fact qualifies when it is not contradicted, its tier is at least
/// `min_tier`, it has not expired and it carries a numeric value. The best
/// qualifying fact has the highest tier, then the latest `asof`; remaining
/// ties go to the earlier fact. Keys without a qualifying fact become
/// [`DataGap`]s whose reason names the last filter that emptied the pool.
pub fn resolve_inputs(
    keys: &[&str],
    facts: &[EvidenceFact],
    rules: ResolutionRules,
) -> ResolvedInputs {
    let mut resolved = ResolvedInputs::default();

    for key in keys {
        if resolved.values.contains(key) {
            continue;
        }
        match best_fact(key, facts, &rules) {
            Ok((fact, value)) => {
                debug!(input = *key, fact_id = %fact.id, value, "resolved input");
                resolved.values.insert(*key, value);
                if !resolved.supporting.contains(&fact.id) {
                    resolved.supporting.push(fact.id);
                }
            }
            Err(reason) => resolved.gaps.push(DataGap {
                input: key.to_string(),
                reason,
                recheck_ttl_days: rules.recheck_ttl_days,
            }),
        }
    }

    resolved
}

fn best_fact<'a>(
    key: &str,
    facts: &'a [EvidenceFact],
    rules: &ResolutionRules,
) -> Result<(&'a EvidenceFact, f64), GapReason> {
    let tagged: Vec<&EvidenceFact> = facts
        .iter()
        .filter(|f| f.kpi_key == key && !f.contradiction_flag)
        .collect();
    if tagged.is_empty() {
        return Err(GapReason::TagAbsent);
    }

    let in_tier: Vec<&EvidenceFact> = tagged
        .into_iter()
        .filter(|f| f.tier >= rules.min_tier)
        .collect();
    if in_tier.is_empty() {
        return Err(GapReason::NotDisclosed);
    }

    let live: Vec<&EvidenceFact> = in_tier
        .into_iter()
        .filter(|f| !f.is_expired(rules.as_of))
        .collect();
    if live.is_empty() {
        return Err(GapReason::DifferentPeriod);
    }

    let mut best: Option<(&EvidenceFact, f64)> = None;
    for fact in live {
        let Some(value) = fact.numeric_value else {
            continue;
        };
        let better = match best {
            None => true,
            Some((current, _)) => (fact.tier, fact.asof) > (current.tier, current.asof),
        };
        if better {
            best = Some((fact, value));
        }
    }

    best.ok_or(GapReason::PhraseNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sightline_domain::{AxisId, DualAnchorStatus, Locator, Polarity};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
    }

    fn fact(kpi: &str, value: Option<f64>, tier: ProvenanceTier, asof: NaiveDate) -> EvidenceFact {
        let url = format!("https://www.sec.gov/{}-{}.htm", kpi, asof);
        EvidenceFact {
            id: FactId::derive(kpi, asof, &url, &format!("{:?}", value)),
            asof,
            tier,
            axis_tag: AxisId::Momentum,
            excerpt: "x".to_string(),
            locator: Locator::TextFragment {
                url,
                fragment: "x".to_string(),
            },
            kpi_key: kpi.to_string(),
            numeric_value: value,
            unit: "%".to_string(),
            ttl_days: 10,
            contradiction_flag: false,
            polarity: Polarity::Neutral,
            credence: 80,
            anchor_status: DualAnchorStatus::Confirmed,
            source_domains: vec!["sec.gov".to_string()],
        }
    }

    fn rules() -> ResolutionRules {
        ResolutionRules {
            as_of: date(30),
            min_tier: ProvenanceTier::CorroboratedSecondary,
            recheck_ttl_days: 7,
        }
    }

    fn gap_reason(resolved: &ResolvedInputs, key: &str) -> Option<GapReason> {
        resolved.gaps.iter().find(|g| g.input == key).map(|g| g.reason)
    }

    #[test]
    fn test_prefers_higher_tier_then_later_date() {
        let facts = vec![
            fact("a", Some(1.0), ProvenanceTier::CorroboratedSecondary, date(29)),
            fact("a", Some(2.0), ProvenanceTier::Primary, date(1)),
            fact("a", Some(3.0), ProvenanceTier::Primary, date(2)),
            fact("a", Some(4.0), ProvenanceTier::Primary, date(2)),
        ];
        let resolved = resolve_inputs(&["a"], &facts, rules());
        assert_eq!(resolved.values.get("a"), Some(3.0));
        assert_eq!(resolved.supporting, vec![facts[2].id]);
        assert!(resolved.gaps.is_empty());
    }

    #[test]
    fn test_gap_reasons() {
        let mut contradicted = fact("c", Some(1.0), ProvenanceTier::Primary, date(29));
        contradicted.contradiction_flag = true;
        let facts = vec![
            fact("below", Some(1.0), ProvenanceTier::Secondary, date(29)),
            fact("stale", Some(1.0), ProvenanceTier::CorroboratedSecondary, date(1)),
            fact("words", None, ProvenanceTier::Primary, date(29)),
            contradicted,
        ];
        let keys = ["missing", "below", "stale", "words", "c"];
        let resolved = resolve_inputs(&keys, &facts, rules());

        assert!(resolved.values.is_empty());
        assert_eq!(gap_reason(&resolved, "missing"), Some(GapReason::TagAbsent));
        assert_eq!(gap_reason(&resolved, "below"), Some(GapReason::NotDisclosed));
        assert_eq!(gap_reason(&resolved, "stale"), Some(GapReason::DifferentPeriod));
        assert_eq!(gap_reason(&resolved, "words"), Some(GapReason::PhraseNotFound));
        assert_eq!(gap_reason(&resolved, "c"), Some(GapReason::TagAbsent));
        assert!(resolved.gaps.iter().all(|g| g.recheck_ttl_days == 7));
    }

    #[test]
    fn test_primary_never_expires_for_inputs() {
        let facts = vec![fact("a", Some(5.0), ProvenanceTier::Primary, date(1))];
        let resolved = resolve_inputs(&["a"], &facts, rules());
        assert_eq!(resolved.values.get("a"), Some(5.0));
    }

    #[test]
    fn test_repeated_key_resolved_once() {
        let facts = vec![fact("a", Some(5.0), ProvenanceTier::Primary, date(29))];
        let resolved = resolve_inputs(&["a", "a"], &facts, rules());
        assert_eq!(resolved.values.len(), 1);
        assert_eq!(resolved.supporting.len(), 1);
    }
}
