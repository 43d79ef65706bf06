//! Consistency checks over the raw numeric inputs

use crate::report::{CheckName, GuardCheck, GuardReport};
use crate::{kpi, GuardConfig, GuardError, ToleranceBand, TolerancePreset};
use serde::{Deserialize, Serialize};
use sightline_domain::KpiInputs;
use tracing::{debug, info, warn};

/// Raw numbers the checks read; any of them may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardInputs {
    /// Reported revenue
    pub revenue: Option<f64>,
    /// Reported gross profit
    pub gross_profit: Option<f64>,
    /// Reported gross margin, percent
    pub gross_margin_pct: Option<f64>,
    /// Guided gross margin, percent
    pub guided_gross_margin_pct: Option<f64>,
    /// Reported operating expenses
    pub operating_expenses: Option<f64>,
    /// Guided opex ratio, percent of revenue
    pub guided_opex_ratio_pct: Option<f64>,
    /// Low end of revenue guidance
    pub revenue_guidance_low: Option<f64>,
    /// High end of revenue guidance
    pub revenue_guidance_high: Option<f64>,
}

impl GuardInputs {
    /// Pick the guard inputs out of resolved KPI values
    pub fn from_kpis(values: &KpiInputs) -> Self {
        Self {
            revenue: values.get(kpi::REVENUE),
            gross_profit: values.get(kpi::GROSS_PROFIT),
            gross_margin_pct: values.get(kpi::GROSS_MARGIN_PCT),
            guided_gross_margin_pct: values.get(kpi::GUIDED_GROSS_MARGIN_PCT),
            operating_expenses: values.get(kpi::OPERATING_EXPENSES),
            guided_opex_ratio_pct: values.get(kpi::GUIDED_OPEX_RATIO_PCT),
            revenue_guidance_low: values.get(kpi::REVENUE_GUIDANCE_LOW),
            revenue_guidance_high: values.get(kpi::REVENUE_GUIDANCE_HIGH),
        }
    }
}

/// Median of a non-empty slice; the mean of the middle pair for even lengths
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Scenario grid of operating expenses: each available revenue point times
/// the guided ratio and the ratio shifted by `step_pp` either way
pub fn opex_grid(inputs: &GuardInputs, step_pp: f64) -> Vec<f64> {
    let Some(ratio) = inputs.guided_opex_ratio_pct else {
        return Vec::new();
    };
    let revenues = [
        inputs.revenue_guidance_low,
        inputs.revenue,
        inputs.revenue_guidance_high,
    ];
    revenues
        .iter()
        .flatten()
        .flat_map(|revenue| {
            [ratio - step_pp, ratio, ratio + step_pp]
                .into_iter()
                .map(move |r| revenue * r / 100.0)
        })
        .collect()
}

/// Numerical consistency guard
///
/// Recomputes derived quantities from the raw inputs and compares them with
/// the reported ones. Failures are reported, never raised.
#[derive(Debug, Clone)]
pub struct NumericGuard {
    config: GuardConfig,
}

impl NumericGuard {
    /// Create a guard with the given configuration
    pub fn new(config: GuardConfig) -> Self {
        Self { config }
    }

    /// Create a guard after checking the configuration
    pub fn try_new(config: GuardConfig) -> Result<Self, GuardError> {
        config.validate().map_err(GuardError::Config)?;
        Ok(Self::new(config))
    }

    /// Create a guard with default configuration
    pub fn default_config() -> Self {
        Self::new(GuardConfig::default())
    }

    /// Get the configuration
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Run every check against the preset's tolerances
    pub fn check(&self, inputs: &GuardInputs, preset: TolerancePreset) -> GuardReport {
        let band = self.config.band(preset);
        let checks = vec![
            self.margin_deviation(inputs, band),
            self.gross_profit_reconciliation(inputs, band),
            self.opex_grid_median(inputs, band),
        ];

        for check in &checks {
            match check.passed {
                Some(true) => debug!(check = %check.name, "guard check passed"),
                Some(false) => warn!(check = %check.name, detail = %check.detail, "guard check failed"),
                None => debug!(check = %check.name, detail = %check.detail, "guard check skipped"),
            }
        }

        let report = GuardReport::from_checks(
            checks,
            preset,
            self.config.severity,
            self.config.confidence_penalty_pp,
        );
        info!(
            passed = report.passed,
            failed = report.failed_count(),
            skipped = report.skipped_count(),
            ?preset,
            "numeric guard complete"
        );
        report
    }

    fn margin_deviation(&self, inputs: &GuardInputs, band: &ToleranceBand) -> GuardCheck {
        let name = CheckName::MarginDeviation;
        let tolerance = band.margin_deviation_pp;
        match (inputs.gross_margin_pct, inputs.guided_gross_margin_pct) {
            (Some(actual), Some(guided)) => {
                let deviation = (actual - guided).abs();
                GuardCheck::evaluated(
                    name,
                    deviation,
                    tolerance,
                    format!(
                        "gross margin {:.2}% vs guided {:.2}% ({:.2}pp, tolerance {:.2}pp)",
                        actual, guided, deviation, tolerance
                    ),
                )
            }
            _ => GuardCheck::skipped(name, tolerance, "gross margin or guidance unavailable"),
        }
    }

    fn gross_profit_reconciliation(&self, inputs: &GuardInputs, band: &ToleranceBand) -> GuardCheck {
        let name = CheckName::GrossProfitReconciliation;
        let tolerance = band.gross_profit_rel;
        match (inputs.revenue, inputs.gross_margin_pct, inputs.gross_profit) {
            (Some(_), Some(_), Some(reported)) if reported == 0.0 => {
                GuardCheck::skipped(name, tolerance, "reported gross profit is zero")
            }
            (Some(revenue), Some(margin), Some(reported)) => {
                let derived = revenue * margin / 100.0;
                let deviation = (derived - reported).abs() / reported.abs();
                GuardCheck::evaluated(
                    name,
                    deviation,
                    tolerance,
                    format!(
                        "derived gross profit {:.2} vs reported {:.2} ({:.1}%, tolerance {:.1}%)",
                        derived,
                        reported,
                        deviation * 100.0,
                        tolerance * 100.0
                    ),
                )
            }
            _ => GuardCheck::skipped(name, tolerance, "revenue, gross margin or gross profit unavailable"),
        }
    }

    fn opex_grid_median(&self, inputs: &GuardInputs, band: &ToleranceBand) -> GuardCheck {
        let name = CheckName::OpexGridMedian;
        let tolerance = band.opex_grid_rel;
        let actual = match inputs.operating_expenses {
            Some(actual) if actual != 0.0 => actual,
            Some(_) => return GuardCheck::skipped(name, tolerance, "operating expenses are zero"),
            None => return GuardCheck::skipped(name, tolerance, "operating expenses unavailable"),
        };
        let grid = opex_grid(inputs, self.config.opex_ratio_step_pp);
        let Some(grid_median) = median(&grid) else {
            return GuardCheck::skipped(name, tolerance, "opex ratio guidance or revenue unavailable");
        };

        let deviation = (grid_median - actual).abs() / actual.abs();
        GuardCheck::evaluated(
            name,
            deviation,
            tolerance,
            format!(
                "opex grid median {:.2} over {} scenarios vs actual {:.2} ({:.1}%, tolerance {:.1}%)",
                grid_median,
                grid.len(),
                actual,
                deviation * 100.0,
                tolerance * 100.0
            ),
        )
    }
}
