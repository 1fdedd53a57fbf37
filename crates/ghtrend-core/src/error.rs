use chrono::NaiveDate;
use thiserror::Error;

use crate::model::Timeframe;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid timeframe: {0} (expected daily, weekly or monthly)")]
    InvalidTimeframe(String),

    #[error("malformed {timeframe} snapshot for {date}: {reason}")]
    MalformedSnapshot {
        timeframe: Timeframe,
        date: NaiveDate,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
