//! Sightline CLI - evidence-gated decision pipeline.

use clap::Parser;
use sightline_cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    sightline_cli::init_tracing(cli.verbose);

    match sightline_cli::run(cli).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
