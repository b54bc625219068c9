//! Error types for the update runner.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a `vox-update` run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Batch library error: {0}")]
    Batch(#[from] vox_batch::BatchError),

    #[error(transparent)]
    Driver(#[from] vox_driver::DriverError),
}
