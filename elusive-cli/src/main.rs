use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::{output, Cli};
use elusive_core::{ElusiveError, RunConfig};
use elusive_storage::CrossCorpusComparator;

fn main() {
    // Initialize logging with ELUSIVE_LOG environment variable support
    let log_level = std::env::var("ELUSIVE_LOG").unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        // Use appropriate exit codes based on error type
        let exit_code = match e.downcast_ref::<ElusiveError>() {
            Some(ElusiveError::MissingCorpus(_)) => 2,
            Some(ElusiveError::OutputNotEmpty(_)) => 3,
            Some(ElusiveError::CorpusOpen { .. }) => 4,
            Some(ElusiveError::MalformedCorpus { .. }) => 5,
            Some(ElusiveError::Database(_)) => 6,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = RunConfig {
        reads_db: cli.reads_db,
        bins_db: cli.bins_db,
        assemblies_db: cli.assemblies_db,
        output_db: cli.output_db,
        force: cli.force,
    };

    let comparator = CrossCorpusComparator::new(&config)?;

    output::action("Comparing corpora");
    let stats = comparator.compare()?;
    let elusive = comparator.find_elusive()?;
    let written = comparator.export_report(&cli.output, &elusive)?;

    if cli.verbose > 0 {
        output::info(&format!("reads summary: {} rows", stats.reads_summary));
        output::info(&format!("bins summary: {} rows", stats.bins_summary));
        if let Some(assemblies) = stats.assemblies_summary {
            output::info(&format!("assemblies summary: {} rows", assemblies));
        }
        output::info(&format!("compare table: {} rows", stats.compare));
    }

    output::success(&format!(
        "{} elusive taxa written to {}",
        written,
        cli.output.display()
    ));
    if let Some(workspace) = config.output_db {
        output::info(&format!(
            "workspace kept at {} for inspection",
            workspace.display()
        ));
    }

    Ok(())
}
