//! Parley CLI - persuasion-susceptibility evaluation runs
//!
//! # Usage
//!
//! ```bash
//! # Run (or resume) an evaluation
//! parley run --config run.toml --strategy authority_effect \
//!     --listener llama3 --persuader gpt4o
//!
//! # Aggregate checkpoint files into a CSV report
//! parley report --results-dir results --out report.csv
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{report, run};

/// Parley - measures how easily a listener model is talked into a false
/// fact by a persuader model, batch by batch with crash-safe resumption.
#[derive(Parser)]
#[command(
    name = "parley",
    version,
    about = "Persuasion-susceptibility evaluation harness",
    long_about = "Parley drives a knowledge-editing dataset through a persuader\n\
                  agent and a listener agent in batches, scoring direct accuracy,\n\
                  paraphrase robustness, and locality after every batch.\n\n\
                  Re-running with identical parameters resumes from the last\n\
                  persisted batch instead of duplicating work."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run or resume an evaluation
    #[command(name = "run")]
    Run(run::RunArgs),

    /// Summarize checkpoint files into a CSV report
    #[command(name = "report")]
    Report(report::ReportArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::Run(args) => run::run(args).await,
        Commands::Report(args) => report::run(args),
    }
}

/// Setup logging based on verbosity level
fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();
}
