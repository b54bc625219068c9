//! Error types for batch-process calls.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, BatchError>;

/// Errors that can occur while talking to the batch library.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Frame of {len} bytes exceeds limit of {max} bytes")]
    FrameTooLarge { len: usize, max: usize },

    #[error("Failed to start bridge `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Processes and datatypes not registered; call register() first")]
    NotRegistered,

    #[error("Process `{process}` reported failure")]
    ProcessFailed { process: String },

    #[error("Process `{process}` failed remotely: {message}")]
    Remote { process: String, message: String },

    #[error("Unexpected response to {request}: {response}")]
    UnexpectedResponse { request: String, response: String },
}
