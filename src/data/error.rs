use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by condition parsing, filtering and aggregation.
///
/// Every variant is terminal for the current invocation; the `Display`
/// text is what the user sees after `Error: `.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("Invalid condition format: {0}")]
    InvalidConditionFormat(String),

    #[error("Column '{0}' not found in CSV")]
    ColumnNotFound(String),

    #[error("Invalid aggregation format: {0}")]
    InvalidAggregationFormat(String),

    #[error("Column '{0}' contains non-numeric values")]
    NonNumericColumn(String),

    #[error("Unknown aggregation function: {0}")]
    UnknownAggregationFunction(String),

    #[error("File '{}' not found", .0.display())]
    FileNotFound(PathBuf),

    /// A row is shorter than the header and has no cell at the column.
    #[error("Row {row} has no value for column '{column}'")]
    MissingCell { row: usize, column: String },
}

pub type QueryResult<T> = Result<T, QueryError>;
