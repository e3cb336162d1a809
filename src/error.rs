//! Error types for Zephyr
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while polling and evaluating operations
#[derive(Debug, Error)]
pub enum ZephyrError {
    /// The payload carried an operator the evaluator does not know
    #[error("\"{0}\" is not a valid operator")]
    InvalidOperator(String),

    /// Network or HTTP transport failure while fetching a payload
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Payload body could not be decoded into an operation record
    #[error("Malformed payload: {0}")]
    Decode(String),

    /// The polling loop was asked to stop
    #[error("Cancelled")]
    Cancelled,

    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),
}

impl ZephyrError {
    /// Cancellation is the expected way a loop ends and is never reported
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ZephyrError::Cancelled)
    }
}

impl From<reqwest::Error> for ZephyrError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ZephyrError::Decode(err.to_string())
        } else {
            ZephyrError::Fetch(err.to_string())
        }
    }
}

/// Result type alias for Zephyr operations
pub type Result<T> = std::result::Result<T, ZephyrError>;
