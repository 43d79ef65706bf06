//! Evidence module - the provenance-tagged fact that every score is built from

use crate::{AxisId, ProvenanceTier};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of words an excerpt may contain
pub const MAX_EXCERPT_WORDS: usize = 25;

/// Namespace for name-based fact identifiers
const FACT_NAMESPACE: uuid::Uuid = uuid::Uuid::from_u128(0x6f1c_2b7e_3d4a_4c59_9a8e_51b3_07d2_c4e1);

/// Count the words of an excerpt (whitespace separated)
pub fn excerpt_word_count(excerpt: &str) -> usize {
    excerpt.split_whitespace().count()
}

/// Stable identifier for an evidence fact
///
/// Derived as a UUIDv5 over the fact's canonical content, so that the same
/// evidence snapshot always produces the same identifiers and therefore
/// byte-identical decision records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactId(uuid::Uuid);

impl FactId {
    /// Derive the identifier from a fact's content
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use sightline_domain::FactId;
    ///
    /// let asof = NaiveDate::from_ymd_opt(2026, 9, 30).unwrap();
    /// let a = FactId::derive("revenue", asof, "https://www.sec.gov/a.htm", "Revenue was $10M.");
    /// let b = FactId::derive("revenue", asof, "https://www.sec.gov/a.htm", "Revenue was $10M.");
    /// assert_eq!(a, b);
    /// ```
    pub fn derive(kpi_key: &str, asof: NaiveDate, url: &str, excerpt: &str) -> Self {
        let name = format!("{}|{}|{}|{}", kpi_key, asof, url, excerpt);
        Self(uuid::Uuid::new_v5(&FACT_NAMESPACE, name.as_bytes()))
    }
}

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where in the source document an excerpt can be found
///
/// Exactly one of two anchor forms is accepted: a URL carrying a text-fragment
/// anchor, or a backup locator recording page, quote and content hash for
/// sources (such as PDFs) where a fragment anchor is infeasible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum Locator {
    /// URL with a `#:~:text=` fragment
    TextFragment {
        /// Full URL including the fragment
        url: String,
        /// Fragment text as it appears in the URL (percent-encoded)
        fragment: String,
    },

    /// Backup locator for sources without fragment support
    Backup {
        /// Source URL (without fragment)
        url: String,
        /// Page number, required for PDF-like sources
        page: Option<u32>,
        /// Verbatim quote
        quote: String,
        /// `sha256:<hex>` of the normalized excerpt
        content_hash: String,
    },
}

impl Locator {
    /// Source URL of the locator
    pub fn url(&self) -> &str {
        match self {
            Locator::TextFragment { url, .. } | Locator::Backup { url, .. } => url,
        }
    }
}

/// Direction in which a fact moves its axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Polarity {
    /// Supports a higher score
    Positive,
    /// Supports a lower score
    Negative,
    /// No directional claim
    #[default]
    Neutral,
}

impl Polarity {
    /// +1, -1 or 0
    pub fn signum(&self) -> i32 {
        match self {
            Polarity::Positive => 1,
            Polarity::Negative => -1,
            Polarity::Neutral => 0,
        }
    }

    /// Parse a sign (`+`, `-`) or polarity name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "+" | "positive" | "pos" => Some(Polarity::Positive),
            "-" | "negative" | "neg" => Some(Polarity::Negative),
            "" | "0" | "neutral" => Some(Polarity::Neutral),
            _ => None,
        }
    }
}

/// Dual-anchor status: how far confirmation of a fact has progressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DualAnchorStatus {
    /// Fully confirmed
    Confirmed,
    /// Confirmation pending
    Pending,
    /// Only a single source so far
    #[default]
    SingleSourced,
}

impl DualAnchorStatus {
    /// Parse a status name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" => Some(DualAnchorStatus::Confirmed),
            "pending" => Some(DualAnchorStatus::Pending),
            "single" | "single_sourced" | "single-sourced" => Some(DualAnchorStatus::SingleSourced),
            _ => None,
        }
    }
}

/// A single validated, provenance-tagged claim
///
/// Facts are produced only by the evidence validator and are immutable
/// thereafter; downstream stages reference them by [`FactId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceFact {
    /// Content-derived identifier
    pub id: FactId,

    /// Date the claim is valid for
    pub asof: NaiveDate,

    /// Assigned provenance tier
    pub tier: ProvenanceTier,

    /// Axis this fact supports
    pub axis_tag: AxisId,

    /// Verbatim excerpt (at most 25 words)
    pub excerpt: String,

    /// Anchor into the source
    pub locator: Locator,

    /// KPI the fact carries a value for
    pub kpi_key: String,

    /// Numeric value, absent for qualitative facts
    pub numeric_value: Option<f64>,

    /// Unit of the numeric value
    pub unit: String,

    /// Validity window in days
    pub ttl_days: u32,

    /// Whether the fact is contradicted by other evidence
    pub contradiction_flag: bool,

    /// Direction of impact
    #[serde(default)]
    pub polarity: Polarity,

    /// Credence in [0, 100]
    pub credence: u8,

    /// Dual-anchor status
    #[serde(default)]
    pub anchor_status: DualAnchorStatus,

    /// Registrable domains the fact was sourced from
    pub source_domains: Vec<String>,
}

impl EvidenceFact {
    /// Days left in the validity window at `as_of` (negative once elapsed)
    pub fn remaining_ttl_days(&self, as_of: NaiveDate) -> i64 {
        i64::from(self.ttl_days) - (as_of - self.asof).num_days()
    }

    /// Whether the fact has logically expired at `as_of`
    pub fn is_expired(&self, as_of: NaiveDate) -> bool {
        self.tier.expires() && self.remaining_ttl_days(as_of) < 0
    }

    /// Number of words in the excerpt
    pub fn word_count(&self) -> usize {
        excerpt_word_count(&self.excerpt)
    }
}
