use thiserror::Error;

/// A single problem found while validating a criteria table.
///
/// Validation collects every issue before failing, so callers see the whole
/// picture at once instead of fixing columns one re-run at a time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required criterion column is absent from a stream's row.
    #[error("stream '{stream}': missing required criterion column '{column}'")]
    MissingColumn {
        stream: String,
        column: &'static str,
    },

    /// A criterion value is outside {0, 1}.
    #[error("stream '{stream}': criterion '{column}' must be 0 or 1, got {value}")]
    OutOfDomain {
        stream: String,
        column: &'static str,
        value: i64,
    },

    /// Two rows share the same stream id.
    #[error("duplicate stream id '{0}'")]
    DuplicateId(String),
}

/// Errors surfaced at the scorer / aggregator boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// The criteria table failed validation; nothing was scored.
    #[error("invalid criteria table: {}", format_validation(.0))]
    InvalidCriteria(Vec<ValidationError>),

    /// Confidence over zero streams divides by zero; reported, never NaN.
    #[error("confidence is undefined for a run with no streams")]
    EmptyRun,
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
