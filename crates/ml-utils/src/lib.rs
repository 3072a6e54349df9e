//! ML Utilities for Fintech Transaction Data
//!
//! Shared feature and validation helpers for fraud detection, credit
//! scoring and trading models:
//!
//! - [`calculate_risk_score`]: income to debt ratio of a record
//! - [`extract_time_features`]: hour, weekday and weekend columns
//! - [`calculate_velocity`]: per-user transaction counts
//! - [`validate_transaction_data`]: best-effort data quality report

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod pipeline;
mod settings;

pub use pipeline::FeaturePipeline;
pub use settings::{Settings, SettingsError};

pub use data_validator::{
    validate_json, validate_transaction_data, MissingValues, ValidationError, ValidationInput,
    ValidationReport,
};
pub use feature_engine::{
    calculate_risk_score, calculate_risk_scores, calculate_velocity, calculate_windowed_velocity,
    extract_time_features, FeatureError, VelocityWindow, VELOCITY_COLUMN,
};
pub use txn_table::{DataType, Record, Table, TableError, Value};

/// Package version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Public helper functions of the package
pub const EXPORTS: [&str; 4] = [
    "calculate_risk_score",
    "extract_time_features",
    "calculate_velocity",
    "validate_transaction_data",
];

/// Initialize logging
pub fn init_logging() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    info!("ML utilities v{} logging initialized", VERSION);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "1.0.0");
    }

    #[test]
    fn test_export_list() {
        assert_eq!(EXPORTS.len(), 4);
        assert!(EXPORTS.contains(&"validate_transaction_data"));
    }
}
