//! Parse the bucketed evidence-store document
//!
//! ```json
//! {
//!   "CONFIRMED":  [{"kpi": "revenue", "value": 1250, "unit": "USDm",
//!                   "asof": "2026-09-30", "tag": "PRIMARY/growth",
//!                   "url": "https://www.sec.gov/a.htm#:~:text=Revenue"}],
//!   "UNCERTAIN":  [],
//!   "HYPOTHESES": []
//! }
//! ```
//!
//! The bucket an entry sits in determines its dual-anchor status.

use crate::{Extraction, ExtractorConfig, ExtractorError};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use sightline_domain::{
    AxisId, DualAnchorStatus, EvidenceCandidate, Polarity, ProvenanceTier, RawLocator,
    SkippedInput,
};
use tracing::{debug, warn};

// Entries stay untyped until each is decoded on its own, so one bad entry
// cannot sink the whole document.
#[derive(Debug, Deserialize)]
struct EvidenceStoreDocument {
    #[serde(rename = "CONFIRMED", default)]
    confirmed: Vec<Value>,
    #[serde(rename = "UNCERTAIN", default)]
    uncertain: Vec<Value>,
    #[serde(rename = "HYPOTHESES", default)]
    hypotheses: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct StoreEntry {
    kpi: String,
    #[serde(default)]
    value: Option<f64>,
    #[serde(default)]
    unit: String,
    asof: NaiveDate,
    tag: String,
    url: String,
    #[serde(default)]
    excerpt: String,
    #[serde(default)]
    polarity: Option<String>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    quote: Option<String>,
    #[serde(default)]
    hash: Option<String>,
    #[serde(default)]
    ttl_days: Option<u32>,
    #[serde(default)]
    credence: Option<u8>,
    #[serde(default)]
    contradiction: bool,
    #[serde(default)]
    also: Vec<String>,
}

/// Parse an evidence-store JSON document
///
/// Entries that cannot be interpreted (wrong field types, bad dates, unknown
/// tags) are skipped with a warning and listed in [`Extraction::skipped`]; a
/// document that is not JSON, or has no usable entry, is an error.
pub fn parse_evidence_store(
    json: &str,
    config: &ExtractorConfig,
) -> Result<Extraction, ExtractorError> {
    if json.trim().is_empty() {
        return Err(ExtractorError::Empty);
    }

    let document: EvidenceStoreDocument = serde_json::from_str(json)?;

    let buckets = [
        ("CONFIRMED", DualAnchorStatus::Confirmed, document.confirmed),
        ("UNCERTAIN", DualAnchorStatus::Pending, document.uncertain),
        ("HYPOTHESES", DualAnchorStatus::SingleSourced, document.hypotheses),
    ];

    let mut extraction = Extraction::default();
    let mut first_error: Option<ExtractorError> = None;

    for (bucket, status, entries) in buckets {
        for (index, raw) in entries.into_iter().enumerate() {
            let parsed = serde_json::from_value::<StoreEntry>(raw)
                .map_err(|e| e.to_string())
                .and_then(|entry| entry_to_candidate(entry, status, config));
            match parsed {
                Ok(candidate) => {
                    debug!(bucket, index, kpi = %candidate.kpi_key, "parsed store entry");
                    extraction.candidates.push(candidate);
                }
                Err(reason) => {
                    warn!("Skipping store entry {} in {}: {}", index, bucket, reason);
                    extraction.skipped.push(SkippedInput::new(
                        format!("{}[{}]", bucket, index),
                        reason.clone(),
                    ));
                    first_error.get_or_insert(ExtractorError::InvalidEntry {
                        bucket: bucket.to_string(),
                        index,
                        reason,
                    });
                }
            }
        }
    }

    if extraction.candidates.is_empty() {
        return Err(first_error.unwrap_or(ExtractorError::Empty));
    }

    Ok(extraction)
}

fn entry_to_candidate(
    entry: StoreEntry,
    anchor_status: DualAnchorStatus,
    config: &ExtractorConfig,
) -> Result<EvidenceCandidate, String> {
    let (tier_tag, axis_tag) = entry
        .tag
        .split_once('/')
        .ok_or_else(|| format!("Tag '{}' is not TIER/AXIS", entry.tag))?;
    let claimed_tier = ProvenanceTier::parse(tier_tag)
        .ok_or_else(|| format!("Unknown tier tag '{}'", tier_tag))?;
    let axis_tag =
        AxisId::parse(axis_tag).ok_or_else(|| format!("Unknown axis tag '{}'", axis_tag))?;
    let polarity = match entry.polarity.as_deref() {
        Some(p) => Polarity::parse(p).ok_or_else(|| format!("Unknown polarity '{}'", p))?,
        None => Polarity::Neutral,
    };
    if let Some(credence) = entry.credence.filter(|c| *c > 100) {
        return Err(format!("Credence {} exceeds 100", credence));
    }

    Ok(EvidenceCandidate {
        asof: entry.asof,
        claimed_tier,
        axis_tag,
        excerpt: entry.excerpt,
        kpi_key: entry.kpi,
        numeric_value: entry.value,
        unit: entry.unit,
        polarity,
        locator: RawLocator {
            url: Some(entry.url).filter(|u| !u.trim().is_empty()),
            page: entry.page,
            quote: entry.quote,
            content_hash: entry.hash,
        },
        corroborating_urls: entry.also,
        ttl_days: entry.ttl_days.or(Some(config.default_ttl_days)),
        credence: entry.credence.or(Some(config.default_credence)),
        contradiction_flag: entry.contradiction,
        anchor_status,
    })
}
