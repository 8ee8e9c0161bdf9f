//! Run configuration: where to read, where to write, and which input
//! columns carry the survey answers.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{AggregateError, Result};

pub const DEFAULT_INPUT_DIR: &str = "surveys";
pub const DEFAULT_OUTPUT_PATH: &str = "processed_data.csv";

/// Input column names.
///
/// Can be overridden from a JSON object on disk; omitted keys keep their
/// defaults:
/// ```json
/// {
///   "importance": "Importancia",
///   "difficulty": "Dificultad de Deducción",
///   "applicability": "Aplicable a",
///   "comments": "Comentarios"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub id: String,
    pub importance: String,
    pub difficulty: String,
    pub applicability: String,
    pub comments: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            id: "#".to_string(),
            importance: "Importance".to_string(),
            difficulty: "Difficulty of Inference".to_string(),
            applicability: "Applicable To".to_string(),
            comments: "Comments".to_string(),
        }
    }
}

impl ColumnNames {
    /// Loads column overrides from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| AggregateError::io(path, e))?;
        serde_json::from_str(&content).map_err(|source| AggregateError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Columns that never reach the output.
    pub fn dropped(&self) -> [&str; 4] {
        [
            self.applicability.as_str(),
            self.importance.as_str(),
            self.difficulty.as_str(),
            self.comments.as_str(),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
    pub columns: ColumnNames,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            columns: ColumnNames::default(),
        }
    }
}
