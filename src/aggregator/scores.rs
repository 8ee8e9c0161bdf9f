use crate::config::ColumnNames;

/// Importance labels, least to most important.
static IMPORTANCE_SCORES: &[(&str, f64)] = &[
    ("Nothing important", 0.0),
    ("Slightly important", 1.0),
    ("Important", 2.0),
    ("Very important", 3.0),
    ("Extremely important", 4.0),
];

/// How hard a tip is to work out on one's own.
static DIFFICULTY_SCORES: &[(&str, f64)] = &[
    ("Easy to infer", 1.0),
    ("Moderately inferable", 2.0),
    ("Difficult to infer", 3.0),
];

/// Audience the tip applies to. "Both" sits halfway between the two.
static APPLICABILITY_SCORES: &[(&str, f64)] = &[
    ("Beginners", 1.0),
    ("Both", 1.5),
    ("Advanced", 2.0),
];

/// The three categorical survey answers that are scored and counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Importance,
    Difficulty,
    Applicability,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Importance,
        Category::Difficulty,
        Category::Applicability,
    ];

    fn table(self) -> &'static [(&'static str, f64)] {
        match self {
            Category::Importance => IMPORTANCE_SCORES,
            Category::Difficulty => DIFFICULTY_SCORES,
            Category::Applicability => APPLICABILITY_SCORES,
        }
    }

    /// Numeric score for `label`, or `None` if the label is not in the vocabulary.
    pub fn score(self, label: &str) -> Option<f64> {
        self.table()
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, score)| *score)
    }

    /// Suffix appended to a count column whose label clashes with another column.
    pub fn suffix(self) -> &'static str {
        match self {
            Category::Importance => "_imp",
            Category::Difficulty => "_diff",
            Category::Applicability => "_app",
        }
    }

    pub fn average_column(self) -> &'static str {
        match self {
            Category::Importance => "Average Importance",
            Category::Difficulty => "Average Difficulty",
            Category::Applicability => "Average Applicability",
        }
    }

    /// Name of the input column holding this category's answers.
    pub fn input_column(self, columns: &ColumnNames) -> &str {
        match self {
            Category::Importance => &columns.importance,
            Category::Difficulty => &columns.difficulty,
            Category::Applicability => &columns.applicability,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}
