//! Error types for the frame update driver.

use crate::ingest::FileKind;
use std::path::PathBuf;
use thiserror::Error;
use vox_batch::BatchError;

/// Result type alias
pub type Result<T> = std::result::Result<T, DriverError>;

/// Errors that stop a driver run.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Batch library error: {0}")]
    Batch(#[from] BatchError),

    #[error("Frame {index} is outside the {kind} list ({len} files)")]
    FrameOutOfRange { kind: FileKind, index: u32, len: usize },

    #[error("Schedule step must be positive (start {start}, nframes {nframes})")]
    ZeroStep { start: u32, nframes: u32 },

    #[error("Path is not valid UTF-8: {}", path.display())]
    NonUtf8Path { path: PathBuf },

    #[error("Failed to list {path}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
