use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use crate::aggregator::scores::Category;
use crate::aggregator::types::SurveyAggregate;

/// Summary of one aggregation run.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub input_dir: String,
    pub output_path: String,
    pub files: usize,
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_discarded: usize,
    pub items: usize,

    // rows whose label has no score
    pub unmapped_importance: usize,
    pub unmapped_difficulty: usize,
    pub unmapped_applicability: usize,
}

impl RunSummary {
    pub fn from_aggregate(aggregate: &SurveyAggregate, files: usize) -> Self {
        RunSummary {
            generated_at: Utc::now(),
            files,
            rows_read: aggregate.rows_kept() + aggregate.rows_discarded(),
            rows_kept: aggregate.rows_kept(),
            rows_discarded: aggregate.rows_discarded(),
            items: aggregate.items().len(),
            unmapped_importance: aggregate.unmapped(Category::Importance),
            unmapped_difficulty: aggregate.unmapped(Category::Difficulty),
            unmapped_applicability: aggregate.unmapped(Category::Applicability),
            ..Default::default()
        }
    }

    /// Set input and output locations
    pub fn with_paths(mut self, input_dir: &Path, output_path: &Path) -> Self {
        self.input_dir = input_dir.display().to_string();
        self.output_path = output_path.display().to_string();
        self
    }

    /// Renders the summary as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn unmapped_total(&self) -> usize {
        self.unmapped_importance + self.unmapped_difficulty + self.unmapped_applicability
    }
}
