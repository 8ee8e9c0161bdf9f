//! CSV parser for survey export files.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{AggregateError, Result};
use crate::table::Table;

/// Reads a header row and all records from `reader` into a [`Table`].
///
/// Cells are kept verbatim. Records shorter than the header are padded with
/// empty (missing) cells; longer records are rejected.
///
/// # Errors
///
/// Returns [`AggregateError::Csv`] for malformed CSV or invalid UTF-8,
/// [`AggregateError::EmptyFile`] when there is no header row, and
/// [`AggregateError::RaggedRow`] for records wider than the header.
pub fn parse_table<R: Read>(reader: R, source: &Path) -> Result<Table> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    let mut headers: Vec<String> = rdr
        .headers()
        .map_err(|e| AggregateError::csv(source, e))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() {
        return Err(AggregateError::EmptyFile(source.to_path_buf()));
    }

    if let Some(first) = headers.first_mut() {
        if let Some(stripped) = first.strip_prefix('\u{feff}') {
            *first = stripped.to_string();
        }
    }

    let mut table = Table::new(unique_headers(headers));
    let width = table.headers.len();

    for result in rdr.records() {
        let record = result.map_err(|e| AggregateError::csv(source, e))?;

        if record.len() > width {
            return Err(AggregateError::RaggedRow {
                path: source.to_path_buf(),
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                expected: width,
                found: record.len(),
            });
        }

        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(width, String::new());
        table.rows.push(row);
    }

    Ok(table)
}

/// Names blank headers `Unnamed: {i}` and renames repeats `name.1`,
/// `name.2`, ... so every column keeps its own data.
fn unique_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut unique = Vec::with_capacity(headers.len());

    for (i, header) in headers.into_iter().enumerate() {
        let base = if header.is_empty() {
            format!("Unnamed: {i}")
        } else {
            header
        };

        let mut name = base.clone();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{base}.{n}");
            n += 1;
        }

        seen.insert(name.clone());
        unique.push(name);
    }

    unique
}

/// Opens and parses the CSV file at `path`.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_table(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|e| AggregateError::io(path, e))?;
    let table = parse_table(file, path)?;
    debug!(
        columns = table.headers.len(),
        rows = table.len(),
        "CSV file parsed"
    );
    Ok(table)
}
