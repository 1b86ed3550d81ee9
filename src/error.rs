//! Application error types.

use thiserror::Error;

use crate::config::ConfigError;
use crate::source::SourceError;
use crate::storage::StorageError;

/// Application-level errors for the workbench.
#[derive(Error, Debug)]
pub enum WorkbenchError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Artifact source error: {0}")]
    Source(#[from] SourceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
