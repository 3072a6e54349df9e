//! Transaction Data Validation
//!
//! Produces best-effort data quality reports for transaction records and
//! tables. Validation never fails; inputs it cannot inspect get a basic
//! report.

mod error;
mod input;
mod validator;

pub use error::ValidationError;
pub use input::{MissingValues, ValidationInput};
pub use validator::{
    validate_json, validate_transaction_data, ValidationReport, BASIC_VALIDATION_NOTE,
    RECORD_DATA_TYPE,
};
