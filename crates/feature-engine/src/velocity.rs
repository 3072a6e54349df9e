//! Per-User Transaction Velocity

use crate::error::FeatureError;
use crate::time::parse_column;
use chrono::{Duration, NaiveDateTime};
use std::collections::HashMap;
use tracing::debug;
use txn_table::{Table, Value, ValueKey};

/// Column added by [`calculate_velocity`].
///
/// The name is historical: the value is the user's total transaction
/// count, no time window is applied. Use [`calculate_windowed_velocity`]
/// for a rolling count.
pub const VELOCITY_COLUMN: &str = "transaction_count_1h";

/// Rolling window for [`calculate_windowed_velocity`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VelocityWindow {
    /// Window length looking back from each transaction
    pub duration: Duration,
    /// Output column name
    pub column: String,
}

impl VelocityWindow {
    pub fn new(duration: Duration, column: impl Into<String>) -> Self {
        Self {
            duration,
            column: column.into(),
        }
    }

    /// One hour window written to `transaction_count_rolling_1h`
    pub fn one_hour() -> Self {
        Self::new(Duration::hours(1), "transaction_count_rolling_1h")
    }
}

impl Default for VelocityWindow {
    fn default() -> Self {
        Self::one_hour()
    }
}

/// Per-user transaction count broadcast to every row of the user.
///
/// Counts rows with a non-missing `time_col` within each `user_col` group,
/// then writes the group's count onto each member row as
/// [`VELOCITY_COLUMN`]. Rows with a missing user get null. Returns a copy
/// of `table`.
pub fn calculate_velocity(
    table: &Table,
    user_col: &str,
    time_col: &str,
) -> Result<Table, FeatureError> {
    let users: Vec<Option<ValueKey>> = table.column(user_col)?.map(Value::key).collect();
    let times = table.column(time_col)?;

    // Aggregate
    let mut counts: HashMap<&ValueKey, i64> = HashMap::new();
    for (user, time) in users.iter().zip(times) {
        if let Some(user) = user {
            let count = counts.entry(user).or_insert(0);
            if !time.is_missing() {
                *count += 1;
            }
        }
    }

    // Expand
    let values: Vec<Value> = users
        .iter()
        .map(|user| {
            user.as_ref()
                .and_then(|u| counts.get(u))
                .map(|&c| Value::Int(c))
                .unwrap_or(Value::Null)
        })
        .collect();

    debug!(
        "Computed velocity for {} rows across {} users",
        values.len(),
        counts.len()
    );
    Ok(table.clone().with_column(VELOCITY_COLUMN, values)?)
}

/// Rolling per-user transaction count.
///
/// For each row, counts rows of the same user whose timestamp lies in
/// `(t - window.duration, t]`, the row itself included. Rows with a missing
/// user or timestamp get null. Returns a copy of `table`.
pub fn calculate_windowed_velocity(
    table: &Table,
    user_col: &str,
    time_col: &str,
    window: &VelocityWindow,
) -> Result<Table, FeatureError> {
    let users: Vec<Option<ValueKey>> = table.column(user_col)?.map(Value::key).collect();
    let timestamps = parse_column(table, time_col)?;

    let mut groups: HashMap<&ValueKey, Vec<NaiveDateTime>> = HashMap::new();
    for (user, ts) in users.iter().zip(&timestamps) {
        if let (Some(user), Some(ts)) = (user, ts) {
            groups.entry(user).or_default().push(*ts);
        }
    }
    for times in groups.values_mut() {
        times.sort_unstable();
    }

    let values: Vec<Value> = users
        .iter()
        .zip(&timestamps)
        .map(|(user, ts)| match (user, ts) {
            (Some(user), Some(ts)) => groups
                .get(user)
                .map(|times| Value::Int(count_in_window(times, *ts, window.duration)))
                .unwrap_or(Value::Null),
            _ => Value::Null,
        })
        .collect();

    debug!(
        "Computed {} rolling velocity for {} rows across {} users",
        window.column,
        values.len(),
        groups.len()
    );
    Ok(table.clone().with_column(window.column.clone(), values)?)
}

/// Entries of sorted `times` in `(at - duration, at]`.
///
/// A window reaching before the earliest representable time covers
/// everything up to `at`.
fn count_in_window(times: &[NaiveDateTime], at: NaiveDateTime, duration: Duration) -> i64 {
    let lo = match at.checked_sub_signed(duration) {
        Some(start) => times.partition_point(|t| *t <= start),
        None => 0,
    };
    let hi = times.partition_point(|t| *t <= at);
    (hi - lo) as i64
}
