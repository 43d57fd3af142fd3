//! Criteria table validation.
//!
//! All schema and domain checks happen here, before any arithmetic. Every
//! problem in the table is collected and returned in one pass; nothing is
//! scored, and no value is silently defaulted, when any row is bad.

use std::collections::HashSet;

use tracing::debug;

use crate::criteria::{CriteriaSet, Criterion};
use crate::error::ValidationError;

use super::CriteriaRow;

/// Validate one row and convert it into a typed [`CriteriaSet`].
///
/// Returns all of the row's problems at once (not just the first): each
/// missing required column, and each value outside {0, 1} with the
/// offending column name.
pub fn parse_row(row: &CriteriaRow) -> Result<CriteriaSet, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut set = CriteriaSet::empty();

    for criterion in Criterion::ALL {
        match row.values.get(criterion.column()) {
            None => errors.push(ValidationError::MissingColumn {
                stream: row.stream.clone(),
                column: criterion.column(),
            }),
            Some(&value) if value != 0 && value != 1 => {
                errors.push(ValidationError::OutOfDomain {
                    stream: row.stream.clone(),
                    column: criterion.column(),
                    value,
                })
            }
            Some(&value) => set.set(criterion, value == 1),
        }
    }

    if errors.is_empty() {
        Ok(set)
    } else {
        Err(errors)
    }
}

/// Validate a whole criteria table.
///
/// Checks every row with [`parse_row`] and rejects duplicate stream ids.
/// On success the returned pairs preserve the table's row order.
pub fn parse_table(rows: &[CriteriaRow]) -> Result<Vec<(String, CriteriaSet)>, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut parsed = Vec::with_capacity(rows.len());
    let mut seen = HashSet::new();

    for row in rows {
        if !seen.insert(row.stream.as_str()) {
            errors.push(ValidationError::DuplicateId(row.stream.clone()));
        }
        match parse_row(row) {
            Ok(set) => parsed.push((row.stream.clone(), set)),
            Err(row_errors) => errors.extend(row_errors),
        }
    }

    if errors.is_empty() {
        debug!(rows = parsed.len(), "criteria table validated");
        Ok(parsed)
    } else {
        debug!(issues = errors.len(), "criteria table rejected");
        Err(errors)
    }
}
