//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// TTL assigned when a record does not state one (days)
    pub default_ttl_days: u32,

    /// Credence assigned when a record does not state one
    pub default_credence: u8,

    /// Treat any malformed line as fatal instead of skipping it
    pub strict_lines: bool,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_ttl_days == 0 {
            return Err("default_ttl_days must be greater than 0".to_string());
        }
        if self.default_credence > 100 {
            return Err("default_credence cannot exceed 100".to_string());
        }
        Ok(())
    }

    /// Strict preset: malformed lines abort parsing
    pub fn strict() -> Self {
        Self {
            strict_lines: true,
            ..Self::default()
        }
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

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            default_ttl_days: 30,
            default_credence: 50,
            strict_lines: false,
        }
    }
}
