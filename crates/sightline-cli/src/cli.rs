//! CLI command definitions and argument parsing.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use sightline_domain::ColorCategory;
use std::path::PathBuf;

/// Sightline - evidence-gated decision pipeline.
#[derive(Debug, Parser)]
#[command(name = "sightline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Pipeline configuration file (TOML)
    #[arg(short, long, global = true, env = "SIGHTLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "json")]
    pub format: CliFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// JSON document (default)
    Json,
    /// Human-readable tables
    Table,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate evidence and print the validation report
    Validate(ValidateArgs),

    /// Evaluate one subject and print its decision document
    Evaluate(EvaluateArgs),

    /// Evaluate many subjects in parallel, one evidence file each
    Batch(BatchArgs),

    /// Print a full pipeline configuration
    Config(ConfigArgs),
}

/// Evidence inputs shared by validate and evaluate.
#[derive(Debug, Clone, clap::Args)]
pub struct EvidenceArgs {
    /// Line-oriented evidence records
    #[arg(short, long)]
    pub evidence: Option<PathBuf>,

    /// Evidence store document (JSON)
    #[arg(short, long)]
    pub store: Option<PathBuf>,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub evidence: EvidenceArgs,
}

/// Arguments for the evaluate command.
#[derive(Debug, Parser)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub evidence: EvidenceArgs,

    /// Evaluation date (YYYY-MM-DD) that TTLs are measured against
    #[arg(short, long)]
    pub as_of: NaiveDate,

    /// Subject name recorded in the document
    #[arg(long, default_value = "subject")]
    pub subject: String,

    /// Skip the confidence overlay
    #[arg(long)]
    pub no_overlay: bool,

    /// Valuation colour of the previous run, for hysteresis
    #[arg(long, value_enum, ignore_case = true)]
    pub previous_color: Option<ColorArg>,
}

/// Arguments for the batch command.
#[derive(Debug, Parser)]
pub struct BatchArgs {
    /// Evaluation date (YYYY-MM-DD)
    #[arg(short, long)]
    pub as_of: NaiveDate,

    /// Skip the confidence overlay
    #[arg(long)]
    pub no_overlay: bool,

    /// Evidence files, one subject each (`.json` = evidence store); the
    /// subject is the file stem
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Print a named preset instead of the effective configuration
    #[arg(short, long, value_enum)]
    pub preset: Option<PresetArg>,
}

/// Valuation colour argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum ColorArg {
    /// GREEN
    Green,
    /// AMBER
    Amber,
    /// RED
    Red,
}

impl From<ColorArg> for ColorCategory {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Green => ColorCategory::Green,
            ColorArg::Amber => ColorCategory::Amber,
            ColorArg::Red => ColorCategory::Red,
        }
    }
}

/// Configuration preset argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetArg {
    /// Defaults
    Default,
    /// Strict preset
    Strict,
    /// Lenient preset
    Lenient,
}

impl PresetArg {
    /// Preset name understood by the pipeline configuration
    pub fn name(&self) -> &'static str {
        match self {
            PresetArg::Default => "default",
            PresetArg::Strict => "strict",
            PresetArg::Lenient => "lenient",
        }
    }
}
