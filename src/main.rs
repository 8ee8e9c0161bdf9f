//! CLI entry point for the survey aggregator.
//!
//! Reads every survey CSV export in a directory and writes one row per
//! surveyed item with vote counts and average scores.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use survey_aggregator::aggregator::pipeline::run;
use survey_aggregator::config::{
    AggregatorConfig, ColumnNames, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_PATH,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "survey_aggregator")]
#[command(about = "Consolidate survey CSV exports into per-item scores", long_about = None)]
struct Cli {
    /// Directory containing the survey CSV files
    #[arg(short = 'd', long, env = "SURVEY_INPUT_DIR", default_value = DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// CSV file to write the consolidated results to
    #[arg(short, long, env = "SURVEY_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Optional: JSON file overriding the input column names
    #[arg(long, value_name = "FILE")]
    columns: Option<PathBuf>,

    /// Print the run summary as JSON on stdout
    #[arg(long, default_value_t = false)]
    summary: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _log_guard = survey_aggregator::logging::init();

    let cli = Cli::parse();

    let columns = match &cli.columns {
        Some(path) => ColumnNames::load(path)
            .with_context(|| format!("loading column names from '{}'", path.display()))?,
        None => ColumnNames::default(),
    };

    let config = AggregatorConfig {
        input_dir: cli.input_dir,
        output_path: cli.output,
        columns,
    };

    let summary = match run(&config) {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, "Aggregation failed");
            return Err(e.into());
        }
    };

    info!(
        files = summary.files,
        items = summary.items,
        rows_discarded = summary.rows_discarded,
        unmapped = summary.unmapped_total(),
        output = %summary.output_path,
        "Aggregation complete"
    );

    if cli.summary {
        println!("{}", summary.to_json()?);
    }

    Ok(())
}
