//! Error types for gdbkit

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GdbkitError {
    // Source enumeration errors
    #[error("Invalid batch mode '{mode}'. Use Folder or File")]
    InvalidBatchMode { mode: String },

    #[error("Source directory not found at {path}")]
    DirectoryNotFound { path: PathBuf },

    // Project container errors
    #[error("Legacy document could not be imported: {path}: {reason}")]
    ImportFailed { path: String, reason: String },

    #[error("Layout not found: {id}")]
    LayoutNotFound { id: usize },

    #[error("Map not found: {id}")]
    MapNotFound { id: usize },

    #[error("Project save failed: {reason}")]
    SaveFailed { reason: String },

    // Geodatabase errors
    #[error("Geodatabase not found: {path}")]
    GeodatabaseNotFound { path: String },

    #[error("Workspace and geodatabase path don't match: requested {requested}, bound {bound}")]
    WorkspaceMismatch { requested: String, bound: String },

    #[error("Describe failed for {item}: {reason}")]
    Introspection { item: String, reason: String },

    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    // Report errors
    #[error("Report error for {path}: {reason}")]
    Report { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for GdbkitError {
    fn from(err: serde_json::Error) -> Self {
        GdbkitError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GdbkitError>;
