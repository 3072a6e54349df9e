//! Transaction Table Model
//!
//! Provides the scalar, record and table types that the feature and
//! validation crates operate on.

mod record;
mod table;
mod value;

pub use record::Record;
pub use table::Table;
pub use value::{DataType, Value, ValueKey};

use thiserror::Error;

/// Errors raised while building or addressing a table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// Referenced column does not exist
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Record has no such field
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Row width or key set differs from the table's columns
    #[error("Row {row} does not match table columns: {reason}")]
    RaggedRow { row: usize, reason: String },

    /// Derived column length differs from row count
    #[error("Column {column} has {actual} values, table has {expected} rows")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Column name given twice
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// JSON input has the wrong shape
    #[error("Invalid JSON input: {0}")]
    InvalidJson(String),
}
