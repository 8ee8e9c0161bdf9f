use tracing::info;

use crate::aggregator::aggregate::aggregate_table;
use crate::aggregator::loader::load_combined;
use crate::config::AggregatorConfig;
use crate::error::Result;
use crate::output::write_aggregate;
use crate::stats::RunSummary;

/// Loads every survey file in the configured directory, consolidates the
/// responses per item and writes the result.
///
/// Nothing is written unless every stage succeeds.
#[tracing::instrument(
    skip_all,
    fields(input_dir = %config.input_dir.display(), output = %config.output_path.display())
)]
pub fn run(config: &AggregatorConfig) -> Result<RunSummary> {
    let (files, table) = load_combined(&config.input_dir)?;
    info!(files, rows = table.len(), "Responses combined");

    let aggregate = aggregate_table(table, &config.columns)?;
    info!(
        items = aggregate.items().len(),
        kept = aggregate.rows_kept(),
        discarded = aggregate.rows_discarded(),
        "Responses aggregated"
    );

    write_aggregate(&config.output_path, &aggregate)?;

    Ok(RunSummary::from_aggregate(&aggregate, files)
        .with_paths(&config.input_dir, &config.output_path))
}
