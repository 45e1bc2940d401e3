//! Error types for the export sink

use thiserror::Error;

/// Export error types
#[derive(Debug, Error)]
pub enum ExportError {
    /// IO error while writing the export file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The share action was dismissed or exited with a failure status
    #[error("Share cancelled: {0}")]
    ShareCancelled(String),

    /// The share program could not be started
    #[error("Share unavailable: {0}")]
    ShareUnavailable(String),

    /// Invalid sink configuration or file name
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
