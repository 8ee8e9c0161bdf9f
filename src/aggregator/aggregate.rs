use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use tracing::debug;

use crate::aggregator::scores::Category;
use crate::aggregator::types::{
    CountColumn, ItemAggregate, ItemId, Response, ResponseSet, SurveyAggregate,
};
use crate::aggregator::utility::mean;
use crate::config::ColumnNames;
use crate::error::{AggregateError, Result};
use crate::table::Table;

/// Splits a combined table into item responses.
///
/// Rows whose id cell is not purely decimal digits (section titles) are
/// dropped. The category and comment columns are pulled out of the row;
/// every other column except the id becomes a passthrough column.
///
/// # Errors
///
/// Returns [`AggregateError::MissingColumn`] if the id column or any of the
/// three category columns is absent. The comments column is optional.
pub fn filter_items(table: Table, columns: &ColumnNames) -> Result<ResponseSet> {
    let required = |name: &str| {
        table
            .column_index(name)
            .ok_or_else(|| AggregateError::MissingColumn(name.to_string()))
    };

    let id_idx = required(&columns.id)?;
    let mut answer_idx = [0usize; 3];
    for category in Category::ALL {
        answer_idx[category.index()] = required(category.input_column(columns))?;
    }

    let dropped = columns.dropped();
    let passthrough_idx: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(i, h)| *i != id_idx && !dropped.contains(&h.as_str()))
        .map(|(i, _)| i)
        .collect();

    let mut set = ResponseSet {
        id_column: columns.id.clone(),
        passthrough_columns: passthrough_idx
            .iter()
            .map(|&i| table.headers[i].clone())
            .collect(),
        ..Default::default()
    };

    for mut row in table.rows {
        let Some(item) = ItemId::parse(&row[id_idx]) else {
            set.rows_discarded += 1;
            continue;
        };

        let answers = answer_idx.map(|i| {
            let cell = std::mem::take(&mut row[i]);
            (!cell.is_empty()).then_some(cell)
        });
        let passthrough = passthrough_idx
            .iter()
            .map(|&i| std::mem::take(&mut row[i]))
            .collect();

        set.responses.push(Response {
            item,
            answers,
            passthrough,
        });
    }

    debug!(
        kept = set.responses.len(),
        discarded = set.rows_discarded,
        "Filtered item rows"
    );

    Ok(set)
}

/// Counts votes per item and label for one category. Blank answers are not counted.
pub fn count_votes(
    responses: &[Response],
    category: Category,
) -> BTreeMap<ItemId, BTreeMap<String, usize>> {
    let mut counts: BTreeMap<ItemId, BTreeMap<String, usize>> = BTreeMap::new();

    for response in responses {
        let entry = counts.entry(response.item.clone()).or_default();
        if let Some(label) = response.answer(category) {
            *entry.entry(label.to_string()).or_default() += 1;
        }
    }

    counts
}

/// Mean score per item for one category, skipping labels without a score.
/// An item with no scored answer maps to `None`.
pub fn mean_scores(responses: &[Response], category: Category) -> BTreeMap<ItemId, Option<f64>> {
    let mut series: BTreeMap<ItemId, Vec<f64>> = BTreeMap::new();

    for response in responses {
        let values = series.entry(response.item.clone()).or_default();
        if let Some(score) = response.score(category) {
            values.push(score);
        }
    }

    series
        .into_iter()
        .map(|(item, values)| (item, mean(&values)))
        .collect()
}

/// Collapses responses into one [`ItemAggregate`] per item.
///
/// Passthrough cells come from the first response seen for the item. Items
/// are sorted by id.
pub fn consolidate(set: ResponseSet) -> SurveyAggregate {
    let responses = &set.responses;

    let counts = Category::ALL.map(|c| count_votes(responses, c));
    let means = Category::ALL.map(|c| mean_scores(responses, c));

    let mut labels: [BTreeSet<String>; 3] = Default::default();
    let mut unmapped = [0usize; 3];
    for response in responses {
        for category in Category::ALL {
            if let Some(label) = response.answer(category) {
                labels[category.index()].insert(label.to_string());
                if category.score(label).is_none() {
                    unmapped[category.index()] += 1;
                    debug!(
                        item = %response.item,
                        ?category,
                        label,
                        "Label has no score"
                    );
                }
            }
        }
    }

    let mut representatives: BTreeMap<ItemId, Vec<String>> = BTreeMap::new();
    for response in responses {
        representatives
            .entry(response.item.clone())
            .or_insert_with(|| response.passthrough.clone());
    }

    let items = representatives
        .into_iter()
        .map(|(item, passthrough)| {
            let item_counts = Category::ALL
                .map(|c| counts[c.index()].get(&item).cloned().unwrap_or_default());
            let averages = Category::ALL.map(|c| means[c.index()].get(&item).copied().flatten());
            ItemAggregate {
                item,
                passthrough,
                counts: item_counts,
                averages,
            }
        })
        .collect();

    SurveyAggregate {
        rows_kept: set.responses.len(),
        rows_discarded: set.rows_discarded,
        id_column: set.id_column,
        passthrough_columns: set.passthrough_columns,
        labels: labels.map(|l| l.into_iter().collect::<Vec<_>>()),
        items,
        unmapped,
    }
}

/// Filters and consolidates a combined survey table.
#[tracing::instrument(skip_all, fields(rows = table.len()))]
pub fn aggregate_table(table: Table, columns: &ColumnNames) -> Result<SurveyAggregate> {
    let set = filter_items(table, columns)?;
    Ok(consolidate(set))
}

impl SurveyAggregate {
    /// Vote-count columns in output order: importance, difficulty, then
    /// applicability, labels sorted within each category.
    ///
    /// A column is named after its label unless the label also names
    /// another output column (the id, a passthrough or average column, or a
    /// label of a different category); then the category suffix is appended,
    /// repeatedly if the suffixed name is itself already in use.
    pub fn count_columns(&self) -> Vec<CountColumn> {
        let mut reserved: HashSet<&str> = HashSet::new();
        reserved.insert(self.id_column.as_str());
        reserved.extend(self.passthrough_columns.iter().map(String::as_str));
        reserved.extend(Category::ALL.iter().map(|c| c.average_column()));

        let mut owners: HashMap<&str, usize> = HashMap::new();
        for labels in &self.labels {
            for label in labels {
                *owners.entry(label.as_str()).or_default() += 1;
            }
        }

        let mut taken: HashSet<String> = HashSet::new();
        let mut columns = Vec::new();
        for category in Category::ALL {
            for label in &self.labels[category.index()] {
                let clash = reserved.contains(label.as_str())
                    || owners.get(label.as_str()).copied().unwrap_or(0) > 1
                    || taken.contains(label);
                let mut name = label.clone();
                if clash {
                    name.push_str(category.suffix());
                    while reserved.contains(name.as_str()) || taken.contains(&name) {
                        name.push_str(category.suffix());
                    }
                }
                taken.insert(name.clone());
                columns.push(CountColumn {
                    category,
                    label: label.clone(),
                    name,
                });
            }
        }

        columns
    }
}
