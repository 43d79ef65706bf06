//! Provenance tier module - how strongly a fact is sourced

use serde::{Deserialize, Serialize};

/// Provenance tier of an evidence fact
///
/// Tiers are ordered by strength of sourcing:
/// - Secondary: single non-primary source, provisional and time-limited
/// - CorroboratedSecondary: confirmed by at least two independent non-primary sources
/// - Primary: directly sourced from an authoritative disclosure
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProvenanceTier {
    /// Single non-primary source
    Secondary,

    /// Independently confirmed by two or more non-primary sources
    CorroboratedSecondary,

    /// Authoritative disclosure
    Primary,
}

impl ProvenanceTier {
    /// Get the wire name of the tier
    pub fn as_str(&self) -> &'static str {
        match self {
            ProvenanceTier::Secondary => "SECONDARY",
            ProvenanceTier::CorroboratedSecondary => "CORROBORATED_SECONDARY",
            ProvenanceTier::Primary => "PRIMARY",
        }
    }

    /// Parse a tier tag, accepting the full names and the short tags `P`, `CS`, `S`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PRIMARY" | "P" => Some(ProvenanceTier::Primary),
            "CORROBORATED_SECONDARY" | "CORROBORATED" | "CS" => {
                Some(ProvenanceTier::CorroboratedSecondary)
            }
            "SECONDARY" | "S" => Some(ProvenanceTier::Secondary),
            _ => None,
        }
    }

    /// Get the next tier in the hierarchy (for promotion)
    pub fn next(&self) -> Option<Self> {
        match self {
            ProvenanceTier::Secondary => Some(ProvenanceTier::CorroboratedSecondary),
            ProvenanceTier::CorroboratedSecondary => Some(ProvenanceTier::Primary),
            ProvenanceTier::Primary => None, // Already at top
        }
    }

    /// Whether facts of this tier expire when their TTL elapses
    ///
    /// Expiry means "TTL elapsed without promotion", so the top tier never expires.
    pub fn expires(&self) -> bool {
        self.next().is_some()
    }
}

impl std::fmt::Display for ProvenanceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProvenanceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid tier: {}", s))
    }
}
