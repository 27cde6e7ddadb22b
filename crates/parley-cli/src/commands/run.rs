//! Run command - execute or resume an evaluation
//!
//! Usage:
//! ```bash
//! parley run --config run.toml --strategy conformity \
//!     --listener llama3 --persuader gpt4o --batch-size 8
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use parley_agents::{known_strategies, strategy_instruction, Listener, Persuader};
use parley_harness::{load_dataset, CheckpointStore, RunConfig, Runner};

/// Arguments for the run command
#[derive(Args)]
pub struct RunArgs {
    /// Path to the TOML run configuration
    #[arg(long, short = 'c', value_name = "FILE")]
    config: PathBuf,

    /// Persuasion strategy identifier (unknown ids use the generic prompt)
    #[arg(long, short = 's')]
    strategy: String,

    /// Listener model identifier from the config's [models] table
    #[arg(long, short = 'l')]
    listener: String,

    /// Persuader model identifier from the config's [models] table
    #[arg(long, short = 'p')]
    persuader: String,

    /// Items per batch
    #[arg(long, short = 'b', default_value_t = 8)]
    batch_size: usize,
}

/// Run the run command
pub async fn run(args: RunArgs) -> Result<()> {
    let config = RunConfig::load(&args.config)
        .with_context(|| format!("Failed to load config: {}", args.config.display()))?;

    if strategy_instruction(&args.strategy).is_none() {
        let known: Vec<&str> = known_strategies().collect();
        println!(
            "{} unknown strategy '{}', using the generic persuasion prompt (known: {})",
            "⚠".yellow().bold(),
            args.strategy,
            known.join(", ")
        );
    }

    let dataset = load_dataset(&config.dataset_path)
        .with_context(|| format!("Failed to load dataset: {}", config.dataset_path.display()))?;

    let persuader = Persuader::new(config.backend(&args.persuader)?);
    let listener = Listener::new(config.backend(&args.listener)?);
    let store = CheckpointStore::for_run(
        &config.output_dir,
        &args.listener,
        &args.persuader,
        &args.strategy,
    );
    let checkpoint = store.path().to_path_buf();

    let runner = Runner::new(persuader, listener, &args.strategy, args.batch_size, store);
    let summary = runner.run(&dataset).await?;

    println!();
    println!("{}", "Parley Run Complete".bold().cyan());
    println!("{}", "═".repeat(40).cyan());
    println!("  {} {}", "Checkpoint:".dimmed(), checkpoint.display());
    println!("  {} {}", "Items:".dimmed(), summary.total);
    println!(
        "  {} {:.4}",
        "Accuracy:".dimmed(),
        summary.accuracy
    );
    println!(
        "  {} {:.4}",
        "Rephrase accuracy:".dimmed(),
        summary.rephrase_accuracy
    );
    println!(
        "  {} {:.4}",
        "Locality accuracy:".dimmed(),
        summary.locality_accuracy
    );
    println!("{} Run complete", "✓".green().bold());

    Ok(())
}
