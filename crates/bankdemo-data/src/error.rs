//! Error types for bankdemo-data

use thiserror::Error;

/// Data provider error type
#[derive(Error, Debug)]
pub enum DataError {
    #[error("No data found for \"{key}\"")]
    NotFound { key: String },

    #[error("Malformed JSON in {source_name}: {message}")]
    Json {
        source_name: String,
        message: String,
    },

    #[error("IO error reading {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Account data has not been loaded")]
    NotLoaded,
}

/// Result type with DataError
pub type DataResult<T> = Result<T, DataError>;
