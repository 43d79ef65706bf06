//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use colored::*;
use serde::Serialize;
use sightline_domain::Action;
use sightline_gatekeeper::ValidationReport;
use sightline_synthesizer::DecisionDocument;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// One subject's outcome in a batch run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    /// Subject name (file stem)
    pub subject: String,
    /// Decision document when the evaluation succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<DecisionDocument>,
    /// Error message when it did not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Output formatter.
pub struct Formatter {
    format: CliFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: CliFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a decision document.
    pub fn format_document(&self, doc: &DecisionDocument) -> Result<String> {
        match self.format {
            CliFormat::Json => Ok(doc.to_json()?),
            CliFormat::Table => Ok(self.format_document_table(doc)),
        }
    }

    /// Format a validation report.
    pub fn format_report(&self, report: &ValidationReport) -> Result<String> {
        match self.format {
            CliFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            CliFormat::Table => Ok(self.format_report_table(report)),
        }
    }

    /// Format the outcome of a batch run.
    pub fn format_batch(&self, entries: &[BatchEntry]) -> Result<String> {
        match self.format {
            CliFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            CliFormat::Table => Ok(self.format_batch_table(entries)),
        }
    }

    fn format_document_table(&self, doc: &DecisionDocument) -> String {
        let mut axes = Builder::default();
        axes.push_record(["Axis", "Stars", "Confidence", "Facts", "Overlay", "Up/Down"]);
        for axis in &doc.axes {
            axes.push_record([
                axis.axis_name.to_string(),
                format!("{}/5", axis.stars),
                format!("{}%", axis.confidence_pct),
                axis.supporting_fact_count.to_string(),
                if axis.overlay_applied { "yes" } else { "-" }.to_string(),
                format!("{}/{}", axis.direction_up_pct, axis.direction_down_pct),
            ]);
        }

        let decision = &doc.decision;
        let mut summary = Builder::default();
        summary.push_record(["Field", "Value"]);
        summary.push_record(["Subject".to_string(), doc.subject.clone()]);
        summary.push_record(["Evaluated on".to_string(), doc.evaluated_on.to_string()]);
        summary.push_record(["Action".to_string(), self.action(decision.action)]);
        summary.push_record([
            "Decision index".to_string(),
            format!("{:.4}", decision.decision_index),
        ]);
        summary.push_record(["Size".to_string(), format!("{:.2}%", decision.size_pct)]);
        summary.push_record([
            "Confidence".to_string(),
            format!("{}%", decision.confidence_pct),
        ]);
        summary.push_record([
            "Valuation".to_string(),
            match &doc.valuation {
                Some(v) => format!(
                    "{} x{:.2} (discount {:.1}%)",
                    v.color_category.as_str(),
                    v.multiplier,
                    v.discount_pct
                ),
                None => "unavailable".to_string(),
            },
        ]);
        summary.push_record([
            "Guard".to_string(),
            if doc.auto_checks.passed {
                self.colorize("passed", "green")
            } else {
                self.colorize(
                    &format!("{} failed", doc.auto_checks.failed_count()),
                    "red",
                )
            },
        ]);
        summary.push_record(["Validation".to_string(), doc.validation.summary()]);

        let mut out = vec![self.table(summary), self.table(axes)];

        if !decision.rationale.is_empty() {
            out.push(decision.rationale.join("\n"));
        }
        for gap in &doc.data_gaps {
            out.push(self.warning(&format!(
                "data gap: {} ({:?}, recheck in {} days)",
                gap.input, gap.reason, gap.recheck_ttl_days
            )));
        }
        for message in &doc.auto_checks.messages {
            out.push(self.warning(message));
        }
        for warning in &doc.warnings {
            out.push(self.warning(warning));
        }

        out.join("\n")
    }

    fn format_report_table(&self, report: &ValidationReport) -> String {
        let mut builder = Builder::default();
        builder.push_record(["#", "KPI", "Failure", "Detail"]);
        for record in &report.rejected {
            builder.push_record([
                record.index.to_string(),
                record.kpi_key.clone(),
                record.failure.to_string(),
                record.detail.clone(),
            ]);
        }

        for skipped in &report.unparsed {
            builder.push_record([
                "-".to_string(),
                "-".to_string(),
                "UNPARSED".to_string(),
                skipped.to_string(),
            ]);
        }

        let summary = report.summary();
        if report.rejected.is_empty() && report.unparsed.is_empty() {
            self.success(&summary)
        } else {
            format!("{}\n{}", self.warning(&summary), self.table(builder))
        }
    }

    fn format_batch_table(&self, entries: &[BatchEntry]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Subject", "Action", "Index", "Size", "Valuation", "Error"]);
        for entry in entries {
            match &entry.document {
                Some(doc) => builder.push_record([
                    entry.subject.clone(),
                    self.action(doc.decision.action),
                    format!("{:.4}", doc.decision.decision_index),
                    format!("{:.2}%", doc.decision.size_pct),
                    doc.decision
                        .color_category
                        .map(|c| c.as_str().to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    String::new(),
                ]),
                None => builder.push_record([
                    entry.subject.clone(),
                    "-".to_string(),
                    "-".to_string(),
                    "-".to_string(),
                    "-".to_string(),
                    self.colorize(entry.error.as_deref().unwrap_or("unknown"), "red"),
                ]),
            }
        }
        self.table(builder)
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    fn action(&self, action: Action) -> String {
        let color = match action {
            Action::Go => "green",
            Action::Watch => "yellow",
            Action::NoGo => "red",
        };
        self.colorize(action.as_str(), color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
