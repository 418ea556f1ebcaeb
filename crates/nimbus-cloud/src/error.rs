//! Compute provider error types

use thiserror::Error;

/// Hard failures raised by a compute provider.
///
/// Anything the provider could not even attempt is reported through
/// [`crate::Outcome::Refused`] instead.
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
