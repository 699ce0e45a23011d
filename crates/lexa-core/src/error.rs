//! Centralized error types for Lexa.

use thiserror::Error;

/// Main error type for core Lexa operations.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Input is empty: nothing to analyze")]
    EmptyInput,

    #[error("A submission is already in flight for this session")]
    SubmissionInFlight,

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Profile file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core Lexa operations.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create an invalid profile error.
    pub fn invalid_profile(msg: impl Into<String>) -> Self {
        Self::InvalidProfile(msg.into())
    }
}
