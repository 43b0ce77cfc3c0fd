//! Error types for kalends operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("Date overflow: {0}")]
    Overflow(String),

    #[error("Invalid ordinal: {0}")]
    InvalidOrdinal(String),

    #[error("Unparseable duration: '{0}'")]
    UnparseableDuration(String),

    #[error("Invalid resolution: {0}")]
    InvalidResolution(String),

    #[error("Invalid hemisphere: {0}")]
    InvalidHemisphere(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

pub type Result<T> = std::result::Result<T, DateError>;
