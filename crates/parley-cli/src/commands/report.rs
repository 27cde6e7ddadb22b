//! Report command - aggregate checkpoint files into CSV
//!
//! Usage:
//! ```bash
//! parley report --results-dir results --out report.csv
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use parley_harness::{collect_summaries, write_csv};

/// Arguments for the report command
#[derive(Args)]
pub struct ReportArgs {
    /// Directory holding checkpoint files (searched recursively)
    #[arg(long, short = 'd', value_name = "DIR", default_value = "./results")]
    results_dir: PathBuf,

    /// Output CSV path
    #[arg(long, short = 'o', value_name = "FILE", default_value = "report.csv")]
    out: PathBuf,
}

/// Run the report command
pub fn run(args: ReportArgs) -> Result<()> {
    let summaries = collect_summaries(&args.results_dir).with_context(|| {
        format!(
            "Failed to scan results directory: {}",
            args.results_dir.display()
        )
    })?;

    if summaries.is_empty() {
        println!(
            "{} no checkpoint files under {}",
            "⚠".yellow().bold(),
            args.results_dir.display()
        );
        return Ok(());
    }

    write_csv(&summaries, &args.out)
        .with_context(|| format!("Failed to write report: {}", args.out.display()))?;

    println!("{}", "Parley Report".bold().cyan());
    println!("{}", "═".repeat(40).cyan());
    for summary in &summaries {
        println!(
            "  {} {} items, accuracy {:.4}",
            summary.file.yellow(),
            summary.total,
            summary.accuracy
        );
    }
    println!(
        "{} {} file(s) summarized to {}",
        "✓".green().bold(),
        summaries.len(),
        args.out.display()
    );

    Ok(())
}
