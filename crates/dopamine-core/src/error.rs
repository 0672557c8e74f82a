//! Error types for dopamine-core.
//!
//! The trackers themselves are total functions and raise nothing; the
//! taxonomy here belongs to the boundary around them (store, config,
//! service preconditions).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for dopamine-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Entity lookup failed; callers must check this before invoking
    /// any tracker transition.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    /// Username uniqueness violated at user creation
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read or write the backing file
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Backing file holds invalid JSON
    #[error("Corrupt store file {path}: {message}")]
    Corrupt { path: PathBuf, message: String },

    /// Failed to serialize entities for persistence
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A previous holder of the store lock panicked
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Home/data directory could not be determined
    #[error("Could not resolve data directory: {0}")]
    DataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
