//! Gatekeeper configuration

use serde::{Deserialize, Serialize};
use sightline_domain::evidence::MAX_EXCERPT_WORDS;

/// Configuration for validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum excerpt length in words (never above 25)
    pub max_excerpt_words: usize,

    /// Domains whose disclosures count as PRIMARY evidence
    ///
    /// A host matches when it equals an entry or is a subdomain of it.
    pub authoritative_domains: Vec<String>,

    /// Distinct non-authoritative domains needed for CORROBORATED_SECONDARY
    pub min_corroborating_domains: usize,

    /// Path suffixes treated as PDF-like sources (backup locator required)
    pub pdf_suffixes: Vec<String>,

    /// Reject backup locators whose supplied hash does not match the excerpt
    pub verify_content_hash: bool,

    /// TTL for candidates that do not state one (days)
    pub default_ttl_days: u32,

    /// Credence for candidates that do not state one
    pub default_credence: u8,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_excerpt_words: MAX_EXCERPT_WORDS,
            authoritative_domains: vec![
                "sec.gov".to_string(),
                "edinet-fsa.go.jp".to_string(),
                "release.tdnet.info".to_string(),
                "jpx.co.jp".to_string(),
                "companieshouse.gov.uk".to_string(),
                "esma.europa.eu".to_string(),
            ],
            min_corroborating_domains: 2,
            pdf_suffixes: vec![".pdf".to_string()],
            verify_content_hash: true,
            default_ttl_days: 30,
            default_credence: 50,
        }
    }
}

impl ValidationConfig {
    /// Create a lenient configuration (supplied hashes are not verified)
    pub fn lenient() -> Self {
        Self {
            verify_content_hash: false,
            ..Self::default()
        }
    }

    /// Create a strict configuration (three independent domains to corroborate)
    pub fn strict() -> Self {
        Self {
            min_corroborating_domains: 3,
            default_ttl_days: 14,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_excerpt_words == 0 || self.max_excerpt_words > MAX_EXCERPT_WORDS {
            return Err(format!(
                "max_excerpt_words must be in 1..={}",
                MAX_EXCERPT_WORDS
            ));
        }
        if self.min_corroborating_domains < 2 {
            return Err("min_corroborating_domains must be at least 2".to_string());
        }
        if self.authoritative_domains.iter().any(|d| d.trim().is_empty()) {
            return Err("authoritative_domains cannot contain empty entries".to_string());
        }
        if self.default_ttl_days == 0 {
            return Err("default_ttl_days must be greater than 0".to_string());
        }
        if self.default_credence > 100 {
            return Err("default_credence cannot exceed 100".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
