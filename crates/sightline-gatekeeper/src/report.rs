//! Batch validation report

use serde::{Deserialize, Serialize};
use sightline_domain::{SkippedInput, ValidationFailure, ValidationWarning};
use std::collections::BTreeMap;

/// A record that failed validation, retained for the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRecord {
    /// Position of the record in the input batch
    pub index: usize,
    /// KPI the record carried
    pub kpi_key: String,
    /// Failure kind
    pub failure: ValidationFailure,
    /// Human-readable detail
    pub detail: String,
}

/// Outcome counts of one validation batch
///
/// Rejected records are kept here rather than discarded, so that a caller can
/// see exactly what was excluded from scoring and why.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Records seen, including source input that never parsed
    pub total: usize,
    /// Records accepted
    pub accepted: usize,
    /// Records rejected, in input order
    pub rejected: Vec<RejectedRecord>,
    /// Rejections per failure kind
    pub failure_counts: BTreeMap<ValidationFailure, usize>,
    /// Warnings per kind over accepted records
    pub warning_counts: BTreeMap<ValidationWarning, usize>,
    /// Source input the parser skipped before validation
    #[serde(default)]
    pub unparsed: Vec<SkippedInput>,
    /// accepted / total, 0 for an empty batch
    pub pass_rate: f64,
}

impl ValidationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted record and its warnings
    pub fn record_accepted(&mut self, warnings: &[ValidationWarning]) {
        self.total += 1;
        self.accepted += 1;
        for warning in warnings {
            *self.warning_counts.entry(*warning).or_insert(0) += 1;
        }
        self.update_pass_rate();
    }

    /// Record a rejected record
    pub fn record_rejected(
        &mut self,
        index: usize,
        kpi_key: &str,
        failure: ValidationFailure,
        detail: impl Into<String>,
    ) {
        self.total += 1;
        *self.failure_counts.entry(failure).or_insert(0) += 1;
        self.rejected.push(RejectedRecord {
            index,
            kpi_key: kpi_key.to_string(),
            failure,
            detail: detail.into(),
        });
        self.update_pass_rate();
    }

    /// Record source input that never became a candidate
    ///
    /// Unparsed input counts towards `total`, so it lowers the pass rate.
    pub fn record_unparsed(&mut self, skipped: &[SkippedInput]) {
        self.total += skipped.len();
        self.unparsed.extend_from_slice(skipped);
        self.update_pass_rate();
    }

    /// Number of rejected records
    pub fn total_rejected(&self) -> usize {
        self.rejected.len()
    }

    /// Count for one failure kind
    pub fn failures_of(&self, failure: ValidationFailure) -> usize {
        self.failure_counts.get(&failure).copied().unwrap_or(0)
    }

    /// Count for one warning kind
    pub fn warnings_of(&self, warning: ValidationWarning) -> usize {
        self.warning_counts.get(&warning).copied().unwrap_or(0)
    }

    fn update_pass_rate(&mut self) {
        self.pass_rate = if self.total == 0 {
            0.0
        } else {
            self.accepted as f64 / self.total as f64
        };
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        let failures: Vec<String> = self
            .failure_counts
            .iter()
            .map(|(failure, count)| format!("{}={}", failure, count))
            .collect();
        format!(
            "{}/{} accepted ({:.1}%){}{}",
            self.accepted,
            self.total,
            self.pass_rate * 100.0,
            if failures.is_empty() {
                String::new()
            } else {
                format!("; rejected: {}", failures.join(", "))
            },
            if self.unparsed.is_empty() {
                String::new()
            } else {
                format!("; unparsed: {}", self.unparsed.len())
            }
        )
    }
}
