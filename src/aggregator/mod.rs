//! Survey response aggregation.
//!
//! This module loads the per-respondent CSV exports, drops section rows,
//! scores the categorical answers, counts votes per item and label, and
//! averages the scores per item.

pub mod aggregate;
pub mod loader;
pub mod pipeline;
pub mod scores;
pub mod types;
pub mod utility;
