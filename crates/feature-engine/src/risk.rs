//! Income-to-Debt Risk Score

use crate::error::FeatureError;
use tracing::debug;
use txn_table::{Record, Table, Value};

/// Record field holding income
pub const INCOME_FIELD: &str = "income";

/// Record field holding debt
pub const DEBT_FIELD: &str = "debt";

/// Column added by [`calculate_risk_scores`]
pub const RISK_SCORE_COLUMN: &str = "risk_score";

/// Smallest divisor used for the ratio
const MIN_DEBT_DIVISOR: f64 = 1.0;

/// Risk score for a single record: `income / max(debt, 1)`.
///
/// Debt below one (zero, negative, fractional) is clamped to one, so the
/// score never divides by zero. A NaN debt yields NaN.
pub fn calculate_risk_score(record: &Record) -> Result<f64, FeatureError> {
    let income = numeric_field(record, INCOME_FIELD)?;
    let debt = numeric_field(record, DEBT_FIELD)?;
    Ok(risk_ratio(income, debt))
}

/// Row-wise risk score over two table columns.
///
/// Returns a copy of `table` with a [`RISK_SCORE_COLUMN`] column. Rows with
/// a missing income or debt get a null score.
pub fn calculate_risk_scores(
    table: &Table,
    income_col: &str,
    debt_col: &str,
) -> Result<Table, FeatureError> {
    let debts: Vec<&Value> = table.column(debt_col)?.collect();
    let incomes = table.column(income_col)?;

    let mut scores = Vec::with_capacity(table.len());
    for (row, (income, debt)) in incomes.zip(debts).enumerate() {
        if income.is_missing() || debt.is_missing() {
            scores.push(Value::Null);
            continue;
        }
        let income = numeric_cell(income_col, row, income)?;
        let debt = numeric_cell(debt_col, row, debt)?;
        scores.push(Value::Float(risk_ratio(income, debt)));
    }

    debug!("Computed {} risk scores from {}/{}", scores.len(), income_col, debt_col);
    Ok(table.clone().with_column(RISK_SCORE_COLUMN, scores)?)
}

fn risk_ratio(income: f64, debt: f64) -> f64 {
    // NaN fails the comparison and propagates
    let divisor = if debt < MIN_DEBT_DIVISOR {
        MIN_DEBT_DIVISOR
    } else {
        debt
    };
    income / divisor
}

fn numeric_field(record: &Record, field: &str) -> Result<f64, FeatureError> {
    let value = record.get(field)?;
    value.as_f64().ok_or_else(|| FeatureError::NotNumeric {
        field: field.to_string(),
        row: None,
        value: value.clone(),
    })
}

fn numeric_cell(column: &str, row: usize, value: &Value) -> Result<f64, FeatureError> {
    value.as_f64().ok_or_else(|| FeatureError::NotNumeric {
        field: column.to_string(),
        row: Some(row),
        value: value.clone(),
    })
}
