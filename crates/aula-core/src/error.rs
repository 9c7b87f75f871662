//! Core error types for aula-core.
//!
//! One top-level `CoreError` with domain-specific sub-enums for storage and
//! configuration. Invalid picker/timer operations are reported here without
//! corrupting state; pool exhaustion is a defined branch of `spin`, not an
//! error.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for aula-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Operation referenced a sector outside the configured range.
    #[error("invalid sector id {sector_id} (configured sectors: 0..{sector_count})")]
    InvalidSectorId {
        sector_id: usize,
        sector_count: usize,
    },

    /// Operation is not valid in the current state, e.g. replacing an
    /// unassigned sector. The state is left untouched.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// A restored snapshot failed invariant validation. Callers recover by
    /// falling back to a fresh default state.
    #[error("corrupt persisted state: {0}")]
    CorruptPersistedState(String),

    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storage-related errors
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("database is locked")]
    Locked,
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
