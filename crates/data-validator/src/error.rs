//! Validation Error Types

use thiserror::Error;
use txn_table::TableError;

/// Reasons a dataset could not be fully validated.
///
/// Never returned from [`crate::validate_transaction_data`]; they select the
/// basic fallback report and are logged.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// Input is not a record or table
    #[error("Not a tabular dataset: {0}")]
    NotTabular(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(#[from] TableError),

    /// Null detection failed on a dataset
    #[error("Missing value scan failed: {0}")]
    MissingScan(String),
}
