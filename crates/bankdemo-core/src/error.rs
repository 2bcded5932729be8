//! Error types for bankdemo-core

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The data provider failed to deliver records
    LoadFailed,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::LoadFailed => write!(f, "LOAD_FAILED"),
        }
    }
}

/// Core engine error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to load transactions: {0}")]
    Load(#[from] bankdemo_data::DataError),
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Load(_) => ErrorCode::LoadFailed,
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let load = CoreError::Load(bankdemo_data::DataError::NotLoaded);
        assert_eq!(load.code(), ErrorCode::LoadFailed);
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::LoadFailed.to_string(), "LOAD_FAILED");
    }
}
