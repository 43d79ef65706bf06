//! Sightline CLI library.
//!
//! Argument parsing, configuration loading, command execution and output
//! formatting for the `sightline` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, CliFormat, Command};
pub use error::{CliError, Result};
pub use output::{BatchEntry, Formatter};

use tracing_subscriber::EnvFilter;

/// Initialize logging to stderr.
///
/// `RUST_LOG` wins when set; otherwise `-v` selects info and `-vv` debug.
pub fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

/// Run a parsed command line and return what should be printed.
pub async fn run(cli: Cli) -> Result<String> {
    let formatter = Formatter::new(cli.format, !cli.no_color);
    let pipeline_config = config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Validate(args) => {
            commands::execute_validate(args, &pipeline_config, &formatter).await
        }
        Command::Evaluate(args) => {
            commands::execute_evaluate(args, &pipeline_config, &formatter).await
        }
        Command::Batch(args) => commands::execute_batch(args, &pipeline_config, &formatter).await,
        Command::Config(args) => commands::execute_config(args, &pipeline_config).await,
    }
}
