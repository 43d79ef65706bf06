//! Unvalidated evidence records as produced by the parser

use crate::{AxisId, DualAnchorStatus, Polarity, ProvenanceTier};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Anchor fields exactly as they appeared in the source record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLocator {
    /// Source URL, possibly carrying a `#:~:text=` fragment
    pub url: Option<String>,
    /// Page number of a backup locator
    pub page: Option<u32>,
    /// Quote of a backup locator
    pub quote: Option<String>,
    /// Content hash of a backup locator
    pub content_hash: Option<String>,
}

impl RawLocator {
    /// Locator consisting of a URL only
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Whether any backup-locator field was supplied
    pub fn has_backup_fields(&self) -> bool {
        self.page.is_some() || self.quote.is_some() || self.content_hash.is_some()
    }
}

/// Source input the parser could not turn into a candidate
///
/// Kept so that a run can report everything it was handed, not only what
/// parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedInput {
    /// Where the input sat, e.g. `source 1, line 4` or `source 2, UNCERTAIN[0]`
    pub location: String,
    /// Why it was skipped
    pub reason: String,
}

impl SkippedInput {
    /// Create a skipped-input diagnostic
    pub fn new(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for SkippedInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location, self.reason)
    }
}

/// A parsed but not yet validated evidence record
///
/// Only the evidence validator turns candidates into
/// [`EvidenceFact`](crate::EvidenceFact)s; nothing downstream reads candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceCandidate {
    /// Date the claim is valid for
    pub asof: NaiveDate,
    /// Tier claimed by the record's tag
    pub claimed_tier: ProvenanceTier,
    /// Axis tag
    pub axis_tag: AxisId,
    /// Excerpt text
    pub excerpt: String,
    /// KPI key from the impact clause
    pub kpi_key: String,
    /// Numeric value from the impact clause
    pub numeric_value: Option<f64>,
    /// Unit from the impact clause
    pub unit: String,
    /// Sign from the impact clause
    pub polarity: Polarity,
    /// Anchor fields
    pub locator: RawLocator,
    /// Additional source URLs backing the claim
    pub corroborating_urls: Vec<String>,
    /// Validity window in days, when stated
    pub ttl_days: Option<u32>,
    /// Credence in [0, 100], when stated
    pub credence: Option<u8>,
    /// Whether the record is flagged as contradicted
    pub contradiction_flag: bool,
    /// Dual-anchor status
    pub anchor_status: DualAnchorStatus,
}

impl EvidenceCandidate {
    /// Minimal candidate with neutral defaults, for builders and tests
    pub fn new(
        asof: NaiveDate,
        claimed_tier: ProvenanceTier,
        axis_tag: AxisId,
        excerpt: impl Into<String>,
        kpi_key: impl Into<String>,
        locator: RawLocator,
    ) -> Self {
        Self {
            asof,
            claimed_tier,
            axis_tag,
            excerpt: excerpt.into(),
            kpi_key: kpi_key.into(),
            numeric_value: None,
            unit: String::new(),
            polarity: Polarity::Neutral,
            locator,
            corroborating_urls: Vec::new(),
            ttl_days: None,
            credence: None,
            contradiction_flag: false,
            anchor_status: DualAnchorStatus::SingleSourced,
        }
    }

    /// Attach a numeric value and unit
    pub fn with_value(mut self, value: f64, unit: impl Into<String>) -> Self {
        self.numeric_value = Some(value);
        self.unit = unit.into();
        self
    }
}
