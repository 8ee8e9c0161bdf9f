//! Output formatting and persistence for the consolidated dataset.

use std::fs;
use std::path::{Path, PathBuf};

use csv::Writer;
use tracing::{debug, info};

use crate::aggregator::scores::Category;
use crate::aggregator::types::{CountColumn, ItemAggregate, SurveyAggregate};
use crate::error::{AggregateError, Result};

/// Formats a score the way it is written to the output: shortest round-trip
/// form, with at least one decimal place. Missing scores are empty cells.
pub fn format_score(value: Option<f64>) -> String {
    match value {
        None => String::new(),
        Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 => format!("{v:.1}"),
        Some(v) => v.to_string(),
    }
}

/// Output header: id, passthrough columns, vote counts, then averages.
pub fn header_row(aggregate: &SurveyAggregate, count_columns: &[CountColumn]) -> Vec<String> {
    let mut header = Vec::with_capacity(
        1 + aggregate.passthrough_columns().len() + count_columns.len() + Category::ALL.len(),
    );
    header.push(aggregate.id_column().to_string());
    header.extend(aggregate.passthrough_columns().iter().cloned());
    header.extend(count_columns.iter().map(|c| c.name.clone()));
    header.extend(Category::ALL.iter().map(|c| c.average_column().to_string()));
    header
}

/// One output record for `item`, aligned with [`header_row`].
pub fn item_row(item: &ItemAggregate, count_columns: &[CountColumn]) -> Vec<String> {
    let mut row = Vec::with_capacity(1 + item.passthrough().len() + count_columns.len() + 3);
    row.push(item.item().to_string());
    row.extend(item.passthrough().iter().cloned());
    row.extend(
        count_columns
            .iter()
            .map(|c| item.count(c.category, &c.label).to_string()),
    );
    row.extend(Category::ALL.iter().map(|&c| format_score(item.average(c))));
    row
}

fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_owned();
    staged.push(".tmp");
    PathBuf::from(staged)
}

/// Writes the consolidated dataset as CSV to `path`.
///
/// Rows go to a sibling `.tmp` file that is renamed over `path` once fully
/// flushed, so a failed write never leaves a partial output behind.
/// Returns the number of item rows written.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn write_aggregate(path: &Path, aggregate: &SurveyAggregate) -> Result<usize> {
    let staged = staging_path(path);

    let result = write_rows(&staged, aggregate);
    if result.is_err() {
        let _ = fs::remove_file(&staged);
    }
    let written = result?;

    fs::rename(&staged, path).map_err(|e| AggregateError::io(path, e))?;
    info!(rows = written, "Output written");
    Ok(written)
}

fn write_rows(path: &Path, aggregate: &SurveyAggregate) -> Result<usize> {
    let count_columns = aggregate.count_columns();
    debug!(count_columns = count_columns.len(), "Writing CSV");

    let mut writer = Writer::from_path(path).map_err(|e| AggregateError::csv(path, e))?;

    writer
        .write_record(header_row(aggregate, &count_columns))
        .map_err(|e| AggregateError::csv(path, e))?;

    for item in aggregate.items() {
        writer
            .write_record(item_row(item, &count_columns))
            .map_err(|e| AggregateError::csv(path, e))?;
    }

    writer.flush().map_err(|e| AggregateError::io(path, e))?;

    Ok(aggregate.items().len())
}
