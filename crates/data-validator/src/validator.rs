//! Transaction Data Quality Reports

use crate::error::ValidationError;
use crate::input::{MissingValues, ValidationInput};
use metrics::counter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};
use txn_table::{DataType, Table};

/// Type tag reported for single records
pub const RECORD_DATA_TYPE: &str = "dict";

/// Note attached to the fallback report
pub const BASIC_VALIDATION_NOTE: &str = "Basic validation only - not a tabular dataset";

/// Result of validation, one shape per input kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationReport {
    /// Tabular dataset with missing value counts
    Table {
        total_rows: usize,
        missing_values: BTreeMap<String, usize>,
        data_types: BTreeMap<String, DataType>,
        validation_passed: bool,
    },
    /// Single record; fields are counted, not checked
    Record {
        total_fields: usize,
        validation_passed: bool,
        data_type: String,
    },
    /// Anything else
    Basic {
        validation_passed: bool,
        note: String,
    },
}

impl ValidationReport {
    /// Report for a record with the given field count
    pub fn record(total_fields: usize) -> Self {
        ValidationReport::Record {
            total_fields,
            validation_passed: true,
            data_type: RECORD_DATA_TYPE.to_string(),
        }
    }

    /// Fallback report
    pub fn basic() -> Self {
        ValidationReport::Basic {
            validation_passed: true,
            note: BASIC_VALIDATION_NOTE.to_string(),
        }
    }

    /// Whether validation passed
    pub fn passed(&self) -> bool {
        match self {
            ValidationReport::Table {
                validation_passed, ..
            }
            | ValidationReport::Record {
                validation_passed, ..
            }
            | ValidationReport::Basic {
                validation_passed, ..
            } => *validation_passed,
        }
    }

    /// Sum of missing cells across all columns; zero for non-tabular reports
    pub fn total_missing(&self) -> usize {
        match self {
            ValidationReport::Table { missing_values, .. } => missing_values.values().sum(),
            _ => 0,
        }
    }
}

/// Build a data quality report. Never fails.
///
/// Records get a field count, tables get per-column missing counts and
/// types and pass only when nothing is missing. Any other input, or a
/// table whose scan fails, gets the basic fallback report.
pub fn validate_transaction_data<'a>(input: impl Into<ValidationInput<'a>>) -> ValidationReport {
    match input.into() {
        ValidationInput::Record(record) => {
            debug!("Validating record with {} fields", record.len());
            ValidationReport::record(record.len())
        }
        ValidationInput::Table(dataset) => table_report(dataset).unwrap_or_else(|e| {
            warn!("Falling back to basic validation: {}", e);
            counter!("validation_fallback_total").increment(1);
            ValidationReport::basic()
        }),
        ValidationInput::Opaque => ValidationReport::basic(),
    }
}

/// Validate loosely shaped JSON.
///
/// An object is treated as a record, an array of objects as a table.
/// Arrays that do not form a table, and scalars, get the fallback report.
pub fn validate_json(json: &serde_json::Value) -> ValidationReport {
    let outcome = match json {
        serde_json::Value::Object(object) => return ValidationReport::record(object.len()),
        serde_json::Value::Array(_) => Table::from_json(json)
            .map_err(ValidationError::from)
            .map(|table| validate_transaction_data(&table)),
        other => Err(ValidationError::NotTabular(json_kind(other).to_string())),
    };

    outcome.unwrap_or_else(|e| {
        debug!("Basic validation for JSON input: {}", e);
        ValidationReport::basic()
    })
}

fn table_report(dataset: &dyn MissingValues) -> Result<ValidationReport, ValidationError> {
    let missing_values = dataset.missing_counts()?;
    let data_types = dataset.column_types()?;
    let total_missing: usize = missing_values.values().sum();

    debug!(
        "Validated {} rows, {} missing cells",
        dataset.row_count(),
        total_missing
    );

    Ok(ValidationReport::Table {
        total_rows: dataset.row_count(),
        missing_values,
        data_types,
        validation_passed: total_missing == 0,
    })
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use txn_table::{Record, Value};

    struct BrokenDataset;

    impl MissingValues for BrokenDataset {
        fn row_count(&self) -> usize {
            7
        }

        fn missing_counts(&self) -> Result<BTreeMap<String, usize>, ValidationError> {
            Err(ValidationError::MissingScan("storage unavailable".to_string()))
        }

        fn column_types(&self) -> Result<BTreeMap<String, DataType>, ValidationError> {
            Ok(BTreeMap::new())
        }
    }

    #[test]
    fn test_empty_record() {
        let report = validate_transaction_data(&Record::new());
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({"total_fields": 0, "validation_passed": true, "data_type": "dict"})
        );
    }

    #[test]
    fn test_record_always_passes() {
        let record = Record::new().with("amount", Value::Null).with("user_id", "u1");
        let report = validate_transaction_data(&record);
        assert_eq!(report, ValidationReport::record(2));
        assert!(report.passed());
    }

    #[test]
    fn test_clean_table_passes() {
        let table = Table::from_rows(
            ["user_id", "amount"],
            vec![vec![Value::from("u1"), Value::Float(12.5)]],
        )
        .unwrap();

        let report = validate_transaction_data(&table);
        assert!(report.passed());
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "total_rows": 1,
                "missing_values": {"amount": 0, "user_id": 0},
                "data_types": {"amount": "float64", "user_id": "string"},
                "validation_passed": true
            })
        );
    }

    #[test]
    fn test_table_with_missing_fails() {
        let table = Table::from_rows(
            ["user_id", "amount"],
            vec![
                vec![Value::from("u1"), Value::Null],
                vec![Value::Null, Value::Float(f64::NAN)],
                vec![Value::from("u3"), Value::Int(4)],
            ],
        )
        .unwrap();

        let report = validate_transaction_data(&table);
        assert!(!report.passed());
        assert_eq!(report.total_missing(), 3);
        let ValidationReport::Table { missing_values, total_rows, .. } = report else {
            panic!("expected table report");
        };
        assert_eq!(total_rows, 3);
        assert_eq!(missing_values["user_id"], 1);
        assert_eq!(missing_values["amount"], 2);
    }

    #[test]
    fn test_empty_table_passes() {
        let table = Table::new(["a"]).unwrap();
        let report = validate_transaction_data(&table);
        assert!(report.passed());
        assert_eq!(report.total_missing(), 0);
    }

    #[test]
    fn test_failing_scan_degrades() {
        let report = validate_transaction_data(ValidationInput::Table(&BrokenDataset));
        assert_eq!(report, ValidationReport::basic());
    }

    #[test]
    fn test_opaque_input() {
        let report = validate_transaction_data(ValidationInput::Opaque);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({"validation_passed": true, "note": BASIC_VALIDATION_NOTE})
        );
    }

    #[test]
    fn test_json_inputs() {
        assert_eq!(validate_json(&json!({})), ValidationReport::record(0));
        assert_eq!(
            validate_json(&json!({"nested": {"a": 1}, "b": 2})),
            ValidationReport::record(2)
        );
        assert_eq!(validate_json(&json!(42)), ValidationReport::basic());
        assert_eq!(validate_json(&json!([1, 2])), ValidationReport::basic());
        assert_eq!(validate_json(&json!([{"a": 1}, {"b": 1}])), ValidationReport::basic());

        let report = validate_json(&json!([{"a": 1}, {"a": null}]));
        assert!(!report.passed());
        assert_eq!(report.total_missing(), 1);
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let report = validate_json(&json!([{"a": 1.5, "b": "x"}]));
        let back: ValidationReport =
            serde_json::from_value(serde_json::to_value(&report).unwrap()).unwrap();
        assert_eq!(back, report);
    }

    proptest! {
        #[test]
        fn prop_passes_iff_no_missing(cells in prop::collection::vec(prop::option::of(-1000i64..1000), 0..50)) {
            let rows = cells.iter().map(|c| vec![Value::from(*c)]);
            let table = Table::from_rows(["amount"], rows).unwrap();
            let report = validate_transaction_data(&table);

            let missing = cells.iter().filter(|c| c.is_none()).count();
            prop_assert_eq!(report.total_missing(), missing);
            prop_assert_eq!(report.passed(), missing == 0);
        }
    }
}
