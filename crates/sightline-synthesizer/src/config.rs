//! Synthesis and whole-pipeline configuration

use serde::{Deserialize, Serialize};
use sightline_extractor::ExtractorConfig;
use sightline_gatekeeper::ValidationConfig;
use sightline_guard::GuardConfig;
use sightline_overlay::OverlayConfig;
use sightline_scoring::ScoringConfig;

/// Weights and thresholds of the decision synthesizer
///
/// # Examples
///
/// ```
/// use sightline_synthesizer::SynthesisConfig;
///
/// let config = SynthesisConfig::default();
/// assert_eq!(config.weight_momentum, 0.6);
/// assert_eq!(config.go_threshold, 0.55);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Weight of the momentum axis
    pub weight_momentum: f64,

    /// Weight of the growth-confidence axis
    pub weight_confidence: f64,

    /// Position size per unit of decision index (percent)
    pub size_slope: f64,

    /// Largest position size (percent)
    pub size_cap: f64,

    /// Decision index at or above which the action is GO
    pub go_threshold: f64,

    /// Decision index at or above which the action is WATCH
    pub watch_threshold: f64,

    /// Ceiling of the decision index when valuation is RED
    pub red_clamp: f64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            weight_momentum: 0.6,
            weight_confidence: 0.4,
            size_slope: 20.0,
            size_cap: 15.0,
            go_threshold: 0.55,
            watch_threshold: 0.32,
            red_clamp: 0.55,
        }
    }
}

impl SynthesisConfig {
    /// Smaller positions for the same index
    pub fn conservative() -> Self {
        Self {
            size_slope: 15.0,
            size_cap: 10.0,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let values = [
            self.weight_momentum,
            self.weight_confidence,
            self.size_slope,
            self.size_cap,
            self.go_threshold,
            self.watch_threshold,
            self.red_clamp,
        ];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err("synthesis parameters must be finite and non-negative".to_string());
        }
        if self.weight_momentum + self.weight_confidence <= 0.0 {
            return Err("axis weights cannot both be zero".to_string());
        }
        if self.watch_threshold > self.go_threshold {
            return Err("watch_threshold cannot exceed go_threshold".to_string());
        }
        Ok(())
    }
}

/// Configuration of every pipeline stage
///
/// Each section maps to one TOML table; missing tables and fields fall back
/// to their defaults.
///
/// ```toml
/// [validation]
/// min_corroborating_domains = 3
///
/// [synthesis]
/// size_cap = 10.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Evidence parsing
    pub extraction: ExtractorConfig,
    /// Evidence validation
    pub validation: ValidationConfig,
    /// Axis scoring and valuation
    pub scoring: ScoringConfig,
    /// Confidence overlay
    pub overlay: OverlayConfig,
    /// Numerical guard
    pub guard: GuardConfig,
    /// Decision synthesis
    pub synthesis: SynthesisConfig,
}

impl PipelineConfig {
    /// Names accepted by [`PipelineConfig::preset`]
    pub const PRESETS: &'static [&'static str] = &["default", "strict", "lenient"];

    /// Strict preset: PRIMARY-only inputs, conservative overlay, critical guard
    pub fn strict() -> Self {
        Self {
            extraction: ExtractorConfig::strict(),
            validation: ValidationConfig::strict(),
            scoring: ScoringConfig::strict(),
            overlay: OverlayConfig::conservative(),
            guard: GuardConfig::strict(),
            synthesis: SynthesisConfig::conservative(),
        }
    }

    /// Lenient preset: SECONDARY inputs allowed, relaxed overlay and guard
    pub fn lenient() -> Self {
        Self {
            extraction: ExtractorConfig::default(),
            validation: ValidationConfig::lenient(),
            scoring: ScoringConfig::lenient(),
            overlay: OverlayConfig::lenient(),
            guard: GuardConfig::lenient(),
            synthesis: SynthesisConfig::default(),
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "default" => Some(Self::default()),
            "strict" => Some(Self::strict()),
            "lenient" => Some(Self::lenient()),
            _ => None,
        }
    }

    /// Validate every section, naming the first one that fails
    pub fn validate(&self) -> Result<(), String> {
        self.extraction
            .validate()
            .map_err(|e| format!("[extraction] {}", e))?;
        self.validation
            .validate()
            .map_err(|e| format!("[validation] {}", e))?;
        self.scoring
            .validate()
            .map_err(|e| format!("[scoring] {}", e))?;
        self.overlay
            .validate()
            .map_err(|e| format!("[overlay] {}", e))?;
        self.guard.validate().map_err(|e| format!("[guard] {}", e))?;
        self.synthesis
            .validate()
            .map_err(|e| format!("[synthesis] {}", e))?;
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
