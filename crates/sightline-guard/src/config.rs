//! Configuration for the numerical consistency guard

use serde::{Deserialize, Serialize};

/// How much a failing check matters downstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuardSeverity {
    /// Message plus a confidence penalty
    #[default]
    Warning,
    /// Additionally caps the action at WATCH
    Critical,
}

/// Which tolerance preset a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TolerancePreset {
    /// Only core evidence contributed
    Core,
    /// The confidence overlay contributed
    OverlayAdmitted,
}

impl TolerancePreset {
    /// Preset for a run, given whether the overlay changed any score
    pub fn for_overlay(contributed: bool) -> Self {
        if contributed {
            TolerancePreset::OverlayAdmitted
        } else {
            TolerancePreset::Core
        }
    }
}

/// Tolerances of the three checks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceBand {
    /// Largest |reported - guided| gross margin, percentage points
    pub margin_deviation_pp: f64,
    /// Largest relative gap between derived and reported gross profit
    pub gross_profit_rel: f64,
    /// Largest relative gap between the opex grid median and actual opex
    pub opex_grid_rel: f64,
}

impl Default for ToleranceBand {
    fn default() -> Self {
        Self::core()
    }
}

impl ToleranceBand {
    /// Tight tolerances for core-only runs
    pub fn core() -> Self {
        Self {
            margin_deviation_pp: 1.0,
            gross_profit_rel: 0.02,
            opex_grid_rel: 0.05,
        }
    }

    /// Relaxed tolerances for runs the overlay contributed to
    pub fn overlay_admitted() -> Self {
        Self {
            margin_deviation_pp: 2.0,
            gross_profit_rel: 0.05,
            opex_grid_rel: 0.10,
        }
    }

    fn validate(&self, name: &str) -> Result<(), String> {
        let values = [
            self.margin_deviation_pp,
            self.gross_profit_rel,
            self.opex_grid_rel,
        ];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(format!("{} tolerances must be finite and non-negative", name));
        }
        Ok(())
    }
}

/// Configuration for the numerical consistency guard
///
/// # Examples
///
/// ```
/// use sightline_guard::{GuardConfig, GuardSeverity};
///
/// let config = GuardConfig::default();
/// assert_eq!(config.core.margin_deviation_pp, 1.0);
/// assert_eq!(config.overlay.margin_deviation_pp, 2.0);
/// assert_eq!(config.severity, GuardSeverity::Warning);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Tolerances when only core evidence contributed
    pub core: ToleranceBand,

    /// Tolerances when the overlay contributed
    pub overlay: ToleranceBand,

    /// Severity of a failing check
    pub severity: GuardSeverity,

    /// Step around the guided opex ratio used to build the scenario grid (pp)
    /// Default: 1.0
    pub opex_ratio_step_pp: f64,

    /// Confidence penalty per failing check (pp)
    /// Default: 5
    pub confidence_penalty_pp: u8,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            core: ToleranceBand::core(),
            overlay: ToleranceBand::overlay_admitted(),
            severity: GuardSeverity::Warning,
            opex_ratio_step_pp: 1.0,
            confidence_penalty_pp: 5,
        }
    }
}

impl GuardConfig {
    /// Strict preset: failing checks are critical
    pub fn strict() -> Self {
        Self {
            severity: GuardSeverity::Critical,
            confidence_penalty_pp: 10,
            ..Self::default()
        }
    }

    /// Lenient preset: both presets use the relaxed tolerances
    pub fn lenient() -> Self {
        Self {
            core: ToleranceBand::overlay_admitted(),
            ..Self::default()
        }
    }

    /// Tolerances for a preset
    pub fn band(&self, preset: TolerancePreset) -> &ToleranceBand {
        match preset {
            TolerancePreset::Core => &self.core,
            TolerancePreset::OverlayAdmitted => &self.overlay,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.core.validate("core")?;
        self.overlay.validate("overlay")?;
        if !self.opex_ratio_step_pp.is_finite() || self.opex_ratio_step_pp < 0.0 {
            return Err("opex_ratio_step_pp must be finite and non-negative".to_string());
        }
        if self.confidence_penalty_pp > 50 {
            return Err("confidence_penalty_pp cannot exceed 50".to_string());
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
