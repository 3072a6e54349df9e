//! Feature Derivation Error Types

use thiserror::Error;
use txn_table::{TableError, Value};

/// Errors during feature derivation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// Column or field lookup failed
    #[error(transparent)]
    Table(#[from] TableError),

    /// Field holds a non-numeric value
    #[error("{field} is not numeric: {value}")]
    NotNumeric {
        field: String,
        /// Row index when the value came from a table
        row: Option<usize>,
        value: Value,
    },

    /// Timestamp cell could not be parsed
    #[error("Cannot parse timestamp in column {column} at row {row}: {value}")]
    TimestampFormat {
        column: String,
        row: usize,
        value: Value,
    },
}
