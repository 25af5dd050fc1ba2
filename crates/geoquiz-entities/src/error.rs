//! Error types for geoquiz-entities

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for dataset operations
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Main error type for dataset operations
///
/// Every variant is fatal. Read-stage variants are raised before the dataset
/// file is touched; write-stage variants leave the previous file in place.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Source file missing or unreadable
    #[error("Failed to read {path:?}: {reason}")]
    Read { path: PathBuf, reason: String },

    /// Source file is not valid JSON
    #[error("Failed to parse {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// JSON is valid but not shaped like a dataset
    #[error("Invalid dataset: {0}")]
    Schema(String),

    /// Malformed `version` field
    #[error("Invalid dataset version: {0}")]
    InvalidVersion(String),

    /// Territory reference list unreadable or invalid
    #[error("Territory reference error: {0}")]
    Reference(String),

    /// Destination unwritable
    #[error("Failed to write {path:?}: {reason}")]
    Write { path: PathBuf, reason: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl DatasetError {
    /// Whether the error happened while producing or writing the output.
    ///
    /// Anything else was raised before the dataset file could be modified.
    pub fn is_write_stage(&self) -> bool {
        matches!(self, DatasetError::Write { .. } | DatasetError::Serialize(_))
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(err: serde_json::Error) -> Self {
        DatasetError::Serialize(err.to_string())
    }
}
