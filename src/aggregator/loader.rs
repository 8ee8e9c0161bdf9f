use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{AggregateError, Result};
use crate::parser::read_table;
use crate::table::Table;

/// Lists the `.csv` files directly inside `dir`, sorted by file name.
pub fn csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(AggregateError::InputDirMissing(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| AggregateError::io(dir, e))? {
        let entry = entry.map_err(|e| AggregateError::io(dir, e))?;
        let path = entry.path();

        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }

        files.push(path);
    }

    files.sort();
    Ok(files)
}

/// Parses every survey file in `dir`, one after another, in file-name order.
///
/// # Errors
///
/// Fails on the first unreadable or malformed file, and with
/// [`AggregateError::NoInputFiles`] when the directory holds no `.csv` file.
#[tracing::instrument(skip_all, fields(dir = %dir.display()))]
pub fn load_tables(dir: &Path) -> Result<Vec<Table>> {
    let files = csv_files(dir)?;
    if files.is_empty() {
        return Err(AggregateError::NoInputFiles(dir.to_path_buf()));
    }

    let mut tables = Vec::with_capacity(files.len());
    for path in &files {
        let table = read_table(path)?;
        debug!(file = %path.display(), rows = table.len(), "Loaded survey file");
        tables.push(table);
    }

    info!(files = tables.len(), "Survey files loaded");
    Ok(tables)
}

/// Loads and stacks every survey file in `dir` into one table.
pub fn load_combined(dir: &Path) -> Result<(usize, Table)> {
    let tables = load_tables(dir)?;
    let files = tables.len();
    Ok((files, Table::concat(tables)))
}
