//! Guard check results

use crate::{GuardSeverity, TolerancePreset};
use serde::{Deserialize, Serialize};
use sightline_domain::ErrorCode;

/// Name of a consistency check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckName {
    /// Reported vs guided gross margin
    MarginDeviation,
    /// Derived vs reported gross profit
    GrossProfitReconciliation,
    /// Opex scenario-grid median vs actual opex
    OpexGridMedian,
}

impl CheckName {
    /// Wire name of the check
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckName::MarginDeviation => "MARGIN_DEVIATION",
            CheckName::GrossProfitReconciliation => "GROSS_PROFIT_RECONCILIATION",
            CheckName::OpexGridMedian => "OPEX_GRID_MEDIAN",
        }
    }
}

impl std::fmt::Display for CheckName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardCheck {
    /// Which check
    pub name: CheckName,
    /// `None` when the check was skipped for missing inputs
    pub passed: Option<bool>,
    /// Observed deviation, in the tolerance's unit
    pub observed: Option<f64>,
    /// Tolerance applied
    pub tolerance: f64,
    /// Human-readable detail
    pub detail: String,
}

impl GuardCheck {
    pub(crate) fn evaluated(name: CheckName, observed: f64, tolerance: f64, detail: String) -> Self {
        Self {
            name,
            passed: Some(observed <= tolerance),
            observed: Some(observed),
            tolerance,
            detail,
        }
    }

    pub(crate) fn skipped(name: CheckName, tolerance: f64, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed: None,
            observed: None,
            tolerance,
            detail: detail.into(),
        }
    }

    /// Whether the check ran and failed
    pub fn failed(&self) -> bool {
        self.passed == Some(false)
    }
}

/// Outcome of all checks for one run
///
/// Skipped checks never fail the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardReport {
    /// No check failed
    pub passed: bool,
    /// Tolerance preset used
    pub preset: TolerancePreset,
    /// Severity of failures
    pub severity: GuardSeverity,
    /// Individual check results, in fixed order
    pub checks: Vec<GuardCheck>,
    /// Warning messages for failed checks
    pub messages: Vec<String>,
    /// Confidence penalty owed by the failures (pp)
    pub confidence_penalty_pp: u32,
}

impl GuardReport {
    pub(crate) fn from_checks(
        checks: Vec<GuardCheck>,
        preset: TolerancePreset,
        severity: GuardSeverity,
        penalty_per_failure: u8,
    ) -> Self {
        let messages: Vec<String> = checks
            .iter()
            .filter(|c| c.failed())
            .map(|c| format!("{}: {}: {}", ErrorCode::NumericGuardFail, c.name, c.detail))
            .collect();
        let failures = messages.len() as u32;
        Self {
            passed: failures == 0,
            preset,
            severity,
            checks,
            messages,
            confidence_penalty_pp: failures * u32::from(penalty_per_failure),
        }
    }

    /// Number of failed checks
    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.failed()).count()
    }

    /// Number of skipped checks
    pub fn skipped_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed.is_none()).count()
    }

    /// Whether the failures must cap the action at WATCH
    pub fn caps_action(&self) -> bool {
        !self.passed && self.severity == GuardSeverity::Critical
    }

    /// Look up a check by name
    pub fn check(&self, name: CheckName) -> Option<&GuardCheck> {
        self.checks.iter().find(|c| c.name == name)
    }
}
