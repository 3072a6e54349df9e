//! Pipeline Settings

use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Settings loading errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Velocity window must be between 1 and {max}s, got {0}s", max = MAX_VELOCITY_WINDOW_SECS)]
    InvalidWindow(i64),
}

/// Longest accepted rolling window (366 days)
pub const MAX_VELOCITY_WINDOW_SECS: i64 = 366 * 24 * 3600;

/// Column names and window length used by [`crate::FeaturePipeline`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Timestamp column
    pub time_col: String,
    /// User identifier column
    pub user_col: String,
    /// Income column for row-wise risk scores
    pub income_col: String,
    /// Debt column for row-wise risk scores
    pub debt_col: String,
    /// Rolling velocity window (seconds)
    pub velocity_window_secs: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_col: "timestamp".to_string(),
            user_col: "user_id".to_string(),
            income_col: feature_engine::INCOME_FIELD.to_string(),
            debt_col: feature_engine::DEBT_FIELD.to_string(),
            velocity_window_secs: 3600,
        }
    }
}

impl Settings {
    /// Load settings: defaults, then an optional file.
    ///
    /// The file format follows its extension (toml, json, yaml). Keys the
    /// file omits keep their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("time_col", defaults.time_col)?
            .set_default("user_col", defaults.user_col)?
            .set_default("income_col", defaults.income_col)?
            .set_default("debt_col", defaults.debt_col)?
            .set_default("velocity_window_secs", defaults.velocity_window_secs)?;

        if let Some(path) = path {
            info!("Loading settings from {}", path.display());
            builder = builder.add_source(File::from(path));
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.velocity_window()?;
        Ok(settings)
    }

    /// Rolling window as a duration, checked against the accepted range
    pub fn velocity_window(&self) -> Result<chrono::Duration, SettingsError> {
        let secs = self.velocity_window_secs;
        if !(1..=MAX_VELOCITY_WINDOW_SECS).contains(&secs) {
            return Err(SettingsError::InvalidWindow(secs));
        }
        chrono::Duration::try_seconds(secs).ok_or(SettingsError::InvalidWindow(secs))
    }
}
