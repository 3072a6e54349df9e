//! Validator Input Shapes

use crate::error::ValidationError;
use std::collections::BTreeMap;
use txn_table::{DataType, Record, Table};

/// Null-detection capability of a tabular dataset
pub trait MissingValues {
    /// Number of rows
    fn row_count(&self) -> usize;

    /// Missing cell count per column
    fn missing_counts(&self) -> Result<BTreeMap<String, usize>, ValidationError>;

    /// Inferred type per column
    fn column_types(&self) -> Result<BTreeMap<String, DataType>, ValidationError>;
}

impl MissingValues for Table {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn missing_counts(&self) -> Result<BTreeMap<String, usize>, ValidationError> {
        self.columns()
            .iter()
            .map(|name| -> Result<_, ValidationError> {
                let missing = self.column(name)?.filter(|v| v.is_missing()).count();
                Ok((name.clone(), missing))
            })
            .collect()
    }

    fn column_types(&self) -> Result<BTreeMap<String, DataType>, ValidationError> {
        self.columns()
            .iter()
            .map(|name| -> Result<_, ValidationError> {
                Ok((name.clone(), DataType::infer(self.column(name)?)))
            })
            .collect()
    }
}

/// Data accepted by [`crate::validate_transaction_data`]
#[derive(Clone, Copy)]
pub enum ValidationInput<'a> {
    /// Single transaction record
    Record(&'a Record),
    /// Any dataset that can report missing values
    Table(&'a dyn MissingValues),
    /// Anything else; only basic validation applies
    Opaque,
}

impl<'a> From<&'a Record> for ValidationInput<'a> {
    fn from(record: &'a Record) -> Self {
        ValidationInput::Record(record)
    }
}

impl<'a> From<&'a Table> for ValidationInput<'a> {
    fn from(table: &'a Table) -> Self {
        ValidationInput::Table(table)
    }
}

impl std::fmt::Debug for ValidationInput<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationInput::Record(r) => f.debug_tuple("Record").field(r).finish(),
            ValidationInput::Table(t) => f
                .debug_struct("Table")
                .field("rows", &t.row_count())
                .finish(),
            ValidationInput::Opaque => f.write_str("Opaque"),
        }
    }
}
