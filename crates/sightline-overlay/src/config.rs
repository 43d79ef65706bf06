//! Configuration for the confidence overlay
//!
//! Defines the admission filter and the bounded per-axis adjustment.

use serde::{Deserialize, Serialize};

/// Configuration for the confidence overlay
///
/// # Examples
///
/// ```
/// use sightline_overlay::OverlayConfig;
///
/// let config = OverlayConfig::default();
/// assert_eq!(config.min_credence, 60);
/// assert_eq!(config.max_remaining_ttl_days, 14);
/// assert_eq!(config.pending_max_remaining_ttl_days, 7);
///
/// let config = OverlayConfig::conservative();
/// assert_eq!(config.min_credence, 70);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Minimum credence for admission
    /// Default: 60
    pub min_credence: u8,

    /// Longest remaining validity window admitted (days)
    /// Default: 14
    pub max_remaining_ttl_days: i64,

    /// Longest remaining validity window admitted while confirmation is pending (days)
    /// Default: 7
    pub pending_max_remaining_ttl_days: i64,

    /// Star delta for exactly one net admitted fact
    pub single_fact_stars: i32,

    /// Confidence delta (pp) for exactly one net admitted fact
    pub single_fact_confidence_pp: i32,

    /// Star delta for two or more net admitted facts
    pub multi_fact_stars: i32,

    /// Confidence delta (pp) for two or more net admitted facts
    pub multi_fact_confidence_pp: i32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            min_credence: 60,
            max_remaining_ttl_days: 14,
            pending_max_remaining_ttl_days: 7,
            single_fact_stars: 1,
            single_fact_confidence_pp: 5,
            multi_fact_stars: 2,
            multi_fact_confidence_pp: 10,
        }
    }
}

impl OverlayConfig {
    /// Conservative preset: higher credence bar, shorter windows
    pub fn conservative() -> Self {
        Self {
            min_credence: 70,
            max_remaining_ttl_days: 7,
            pending_max_remaining_ttl_days: 3,
            ..Self::default()
        }
    }

    /// Lenient preset: lower credence bar
    pub fn lenient() -> Self {
        Self {
            min_credence: 50,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_credence > 100 {
            return Err("min_credence cannot exceed 100".to_string());
        }
        if self.max_remaining_ttl_days < 0 || self.pending_max_remaining_ttl_days < 0 {
            return Err("TTL windows cannot be negative".to_string());
        }
        if self.pending_max_remaining_ttl_days > self.max_remaining_ttl_days {
            return Err(
                "pending_max_remaining_ttl_days cannot exceed max_remaining_ttl_days".to_string(),
            );
        }
        if self.single_fact_stars < 0 || self.single_fact_confidence_pp < 0 {
            return Err("overlay deltas cannot be negative".to_string());
        }
        if self.multi_fact_stars < self.single_fact_stars
            || self.multi_fact_confidence_pp < self.single_fact_confidence_pp
        {
            return Err("multi-fact deltas must be at least the single-fact deltas".to_string());
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
