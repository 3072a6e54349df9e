//! Feature Engineering Engine
//!
//! Derives risk, time-of-day and velocity features from transaction records
//! and tables. Every derivation returns a new table and leaves its input
//! untouched.

mod error;
mod risk;
mod time;
mod velocity;

pub use error::FeatureError;
pub use risk::{
    calculate_risk_score, calculate_risk_scores, DEBT_FIELD, INCOME_FIELD, RISK_SCORE_COLUMN,
};
pub use time::{
    extract_time_features, is_weekend, parse_timestamp, DAY_OF_WEEK_COLUMN, HOUR_COLUMN,
    IS_WEEKEND_COLUMN,
};
pub use velocity::{
    calculate_velocity, calculate_windowed_velocity, VelocityWindow, VELOCITY_COLUMN,
};
