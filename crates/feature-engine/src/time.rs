//! Time-of-Day and Day-of-Week Features

use crate::error::FeatureError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};
use tracing::debug;
use txn_table::{Table, Value};

/// Hour of day column (0-23)
pub const HOUR_COLUMN: &str = "hour";

/// Day of week column (0 = Monday .. 6 = Sunday)
pub const DAY_OF_WEEK_COLUMN: &str = "day_of_week";

/// Weekend flag column
pub const IS_WEEKEND_COLUMN: &str = "is_weekend";

/// Naive layouts tried after RFC 3339, in order
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Parse a non-missing timestamp cell.
///
/// Strings with an offset keep their local wall-clock time. Integers are
/// Unix epoch nanoseconds.
pub fn parse_timestamp(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Timestamp(ts) => Some(*ts),
        Value::Str(s) => parse_timestamp_str(s.trim()),
        Value::Int(nanos) => DateTime::from_timestamp(
            nanos.div_euclid(NANOS_PER_SECOND),
            nanos.rem_euclid(NANOS_PER_SECOND) as u32,
        )
        .map(|dt| dt.naive_utc()),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, format) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse every cell of a timestamp column; missing cells map to `None`.
pub(crate) fn parse_column(
    table: &Table,
    time_col: &str,
) -> Result<Vec<Option<NaiveDateTime>>, FeatureError> {
    table
        .column(time_col)?
        .enumerate()
        .map(|(row, cell)| {
            if cell.is_missing() {
                return Ok(None);
            }
            parse_timestamp(cell)
                .map(Some)
                .ok_or_else(|| FeatureError::TimestampFormat {
                    column: time_col.to_string(),
                    row,
                    value: cell.clone(),
                })
        })
        .collect()
}

/// Whether a Monday-based day index falls on Saturday or Sunday
pub fn is_weekend(day_of_week: u32) -> bool {
    matches!(day_of_week, 5 | 6)
}

/// Derive hour, day-of-week and weekend columns from `time_col`.
///
/// Returns a copy of `table`; the input is left untouched. Missing
/// timestamps give null hour and day and a false weekend flag.
pub fn extract_time_features(table: &Table, time_col: &str) -> Result<Table, FeatureError> {
    let timestamps = parse_column(table, time_col)?;

    let mut hours = Vec::with_capacity(timestamps.len());
    let mut days = Vec::with_capacity(timestamps.len());
    let mut weekends = Vec::with_capacity(timestamps.len());

    for ts in &timestamps {
        match ts {
            Some(ts) => {
                let day = ts.weekday().num_days_from_monday();
                hours.push(Value::Int(ts.hour() as i64));
                days.push(Value::Int(day as i64));
                weekends.push(Value::Bool(is_weekend(day)));
            }
            None => {
                hours.push(Value::Null);
                days.push(Value::Null);
                weekends.push(Value::Bool(false));
            }
        }
    }

    debug!("Extracted time features for {} rows from {}", timestamps.len(), time_col);

    Ok(table
        .clone()
        .with_column(HOUR_COLUMN, hours)?
        .with_column(DAY_OF_WEEK_COLUMN, days)?
        .with_column(IS_WEEKEND_COLUMN, weekends)?)
}
