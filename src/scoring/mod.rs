pub mod engine;
pub mod validation;

use std::collections::BTreeMap;

use serde::Deserialize;

pub use engine::{score_criteria, ScoredStream, StreamScore, STREAM_MAX_WEIGHT};
pub use validation::{parse_row, parse_table};

/// One row of the criteria table handed over by the loader.
///
/// The loader guarantees nothing; every row passes through [`parse_table`]
/// before any scoring happens. Columns beyond the 15 required criteria are
/// tolerated and ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CriteriaRow {
    pub stream: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, i64>,
}

impl CriteriaRow {
    pub fn new(stream: impl Into<String>) -> Self {
        Self {
            stream: stream.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builder-style column assignment, mainly for tests and callers that
    /// assemble rows in code rather than deserializing them.
    pub fn with(mut self, column: &str, value: i64) -> Self {
        self.values.insert(column.to_string(), value);
        self
    }
}
