//! Data types used by the aggregation pipeline.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::aggregator::scores::Category;
use crate::aggregator::utility::is_digits;

/// Identifier of a surveyed item: a run of decimal digits.
///
/// Leading zeros are dropped, so `"007"` and `"7"` name the same item.
/// Ordering is numeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl ItemId {
    /// Returns `None` for anything that is not purely ASCII digits, such as
    /// the section titles interleaved with items in survey exports.
    pub fn parse(raw: &str) -> Option<Self> {
        if !is_digits(raw) {
            return None;
        }
        let trimmed = raw.trim_start_matches('0');
        let canonical = if trimmed.is_empty() { "0" } else { trimmed };
        Some(ItemId(canonical.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for ItemId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for ItemId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One respondent's answers for one item, after section rows are filtered out.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub(crate) item: ItemId,
    /// Answer text per [`Category`]; `None` when the cell was blank.
    pub(crate) answers: [Option<String>; 3],
    /// Cells of the passthrough columns, aligned with [`ResponseSet::passthrough_columns`].
    pub(crate) passthrough: Vec<String>,
}

impl Response {
    pub fn item(&self) -> &ItemId {
        &self.item
    }

    pub fn answer(&self, category: Category) -> Option<&str> {
        self.answers[category.index()].as_deref()
    }

    pub fn score(&self, category: Category) -> Option<f64> {
        self.answer(category).and_then(|label| category.score(label))
    }
}

/// All item rows of a survey run plus the bookkeeping from filtering.
#[derive(Debug, Clone, Default)]
pub struct ResponseSet {
    pub(crate) id_column: String,
    pub(crate) passthrough_columns: Vec<String>,
    pub(crate) responses: Vec<Response>,
    pub(crate) rows_discarded: usize,
}

impl ResponseSet {
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn rows_discarded(&self) -> usize {
        self.rows_discarded
    }
}

/// Consolidated result for a single item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemAggregate {
    pub(crate) item: ItemId,
    pub(crate) passthrough: Vec<String>,
    pub(crate) counts: [BTreeMap<String, usize>; 3],
    pub(crate) averages: [Option<f64>; 3],
}

impl ItemAggregate {
    pub fn item(&self) -> &ItemId {
        &self.item
    }

    pub fn passthrough(&self) -> &[String] {
        &self.passthrough
    }

    /// Votes for `label` in `category`; zero when the label never occurs for this item.
    pub fn count(&self, category: Category, label: &str) -> usize {
        self.counts[category.index()]
            .get(label)
            .copied()
            .unwrap_or(0)
    }

    /// Total votes across all labels of `category`.
    pub fn total_votes(&self, category: Category) -> usize {
        self.counts[category.index()].values().sum()
    }

    pub fn average(&self, category: Category) -> Option<f64> {
        self.averages[category.index()]
    }
}

/// A named vote-count column of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountColumn {
    pub category: Category,
    pub label: String,
    pub name: String,
}

/// The whole consolidated dataset, one [`ItemAggregate`] per item, sorted by id.
#[derive(Debug, Clone, Default)]
pub struct SurveyAggregate {
    pub(crate) id_column: String,
    pub(crate) passthrough_columns: Vec<String>,
    /// Distinct labels observed per category, sorted.
    pub(crate) labels: [Vec<String>; 3],
    pub(crate) items: Vec<ItemAggregate>,
    pub(crate) rows_kept: usize,
    pub(crate) rows_discarded: usize,
    /// Rows per category whose label had no score.
    pub(crate) unmapped: [usize; 3],
}

impl SurveyAggregate {
    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    pub fn passthrough_columns(&self) -> &[String] {
        &self.passthrough_columns
    }

    pub fn labels(&self, category: Category) -> &[String] {
        &self.labels[category.index()]
    }

    pub fn items(&self) -> &[ItemAggregate] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&ItemAggregate> {
        let id = ItemId::parse(id)?;
        self.items
            .binary_search_by(|agg| agg.item.cmp(&id))
            .ok()
            .map(|i| &self.items[i])
    }

    pub fn rows_kept(&self) -> usize {
        self.rows_kept
    }

    pub fn rows_discarded(&self) -> usize {
        self.rows_discarded
    }

    pub fn unmapped(&self, category: Category) -> usize {
        self.unmapped[category.index()]
    }
}
