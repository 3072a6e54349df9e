//! Configured Feature Pipeline

use crate::settings::{Settings, SettingsError};
use feature_engine::{
    calculate_risk_scores, calculate_velocity, calculate_windowed_velocity, extract_time_features,
    FeatureError, VelocityWindow,
};
use metrics::counter;
use tracing::{debug, info};
use txn_table::Table;

/// Runs the table features with configured column names
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    settings: Settings,
    window: VelocityWindow,
}

impl FeaturePipeline {
    /// Create a pipeline from loaded settings
    ///
    /// Fails when the window length is outside the accepted range.
    pub fn from_settings(settings: Settings) -> Result<Self, SettingsError> {
        let window = VelocityWindow::new(
            settings.velocity_window()?,
            format!("transaction_count_rolling_{}s", settings.velocity_window_secs),
        );
        info!(
            "Creating feature pipeline: time_col={}, user_col={}, window={}",
            settings.time_col, settings.user_col, window.column
        );
        Ok(Self { settings, window })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Name of the rolling velocity column this pipeline writes
    pub fn window_column(&self) -> &str {
        &self.window.column
    }

    /// Derive time, velocity and (when both columns exist) risk features.
    ///
    /// The input table is not modified.
    pub fn run(&self, table: &Table) -> Result<Table, FeatureError> {
        let s = &self.settings;

        let mut out = extract_time_features(table, &s.time_col)?;
        out = calculate_velocity(&out, &s.user_col, &s.time_col)?;
        out = calculate_windowed_velocity(&out, &s.user_col, &s.time_col, &self.window)?;

        if out.column_index(&s.income_col).is_ok() && out.column_index(&s.debt_col).is_ok() {
            out = calculate_risk_scores(&out, &s.income_col, &s.debt_col)?;
        } else {
            debug!("Skipping risk scores: {}/{} not present", s.income_col, s.debt_col);
        }

        counter!("feature_pipeline_rows_total").increment(out.len() as u64);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use txn_table::Value;

    fn transactions() -> Table {
        Table::from_rows(
            ["user_id", "timestamp", "income", "debt"],
            vec![
                vec![Value::from("u1"), Value::from("2024-06-01 09:00:00"), Value::Int(900), Value::Int(0)],
                vec![Value::from("u1"), Value::from("2024-06-01 09:20:00"), Value::Int(900), Value::Int(3)],
                vec![Value::from("u2"), Value::from("2024-06-03 18:00:00"), Value::Int(500), Value::Int(5)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_default_pipeline_columns() {
        let pipeline = FeaturePipeline::from_settings(Settings::default()).unwrap();
        let out = pipeline.run(&transactions()).unwrap();

        assert_eq!(pipeline.window_column(), "transaction_count_rolling_3600s");
        assert_eq!(
            out.columns(),
            &[
                "user_id",
                "timestamp",
                "income",
                "debt",
                "hour",
                "day_of_week",
                "is_weekend",
                "transaction_count_1h",
                "transaction_count_rolling_3600s",
                "risk_score",
            ]
        );
        assert_eq!(out.value(0, "risk_score").unwrap(), Some(&Value::Float(900.0)));
        assert_eq!(out.value(1, "transaction_count_rolling_3600s").unwrap(), Some(&Value::Int(2)));
    }

    #[test]
    fn test_skips_risk_without_columns() {
        let table = Table::from_rows(
            ["user_id", "timestamp"],
            vec![vec![Value::Int(1), Value::from("2024-06-01 09:00:00")]],
        )
        .unwrap();
        let out = FeaturePipeline::from_settings(Settings::default()).unwrap().run(&table).unwrap();
        assert!(out.column_index("risk_score").is_err());
    }

    #[test]
    fn test_custom_columns() {
        let settings = Settings {
            user_col: "account".to_string(),
            velocity_window_secs: 600,
            ..Settings::default()
        };
        let pipeline = FeaturePipeline::from_settings(settings).unwrap();
        assert!(matches!(
            pipeline.run(&transactions()),
            Err(FeatureError::Table(_))
        ));
        assert_eq!(pipeline.window_column(), "transaction_count_rolling_600s");
    }

    #[test]
    fn test_rejects_out_of_range_window() {
        for secs in [0, -60, 10_000_000_000_000, i64::MAX] {
            let settings = Settings {
                velocity_window_secs: secs,
                ..Settings::default()
            };
            assert!(matches!(
                FeaturePipeline::from_settings(settings),
                Err(SettingsError::InvalidWindow(s)) if s == secs
            ));
        }
    }
}
