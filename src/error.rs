//! Error types for treecat
//!
//! Design philosophy follows the rest of the crate:
//! - thiserror for structured error types in library code
//! - Errors carry the failing path so diagnostics are actionable
//! - Recoverable per-file problems never become errors at all; they are
//!   logged and skipped at the point of failure

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the treecat application
#[derive(Error, Debug)]
pub enum WalkerError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Shared sink errors (content sink, audit sink, directory logs)
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// Worker/concurrency errors
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    /// Failed to enumerate a directory; fatal for that isolate's branch
    #[error("Failed to read directory '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// I/O errors (root canonicalization, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Root path does not exist
    #[error("Root directory '{path}' does not exist")]
    RootNotFound { path: PathBuf },

    /// Root path exists but is not a directory
    #[error("Root path '{path}' is not a directory")]
    RootNotADirectory { path: PathBuf },

    /// Eligibility marker is empty
    #[error("File marker must not be empty")]
    EmptyMarker,
}

/// Errors establishing or finalizing an output sink
#[derive(Error, Debug)]
pub enum SinkError {
    /// Failed to create a sink artifact (content sink, audit sink, or a
    /// per-directory log); always fatal per the audit-trail policy
    #[error("Failed to create '{path}': {source}")]
    CreateFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to append to a sink whose writes are fatal (a directory log's
    /// own visit record)
    #[error("Failed to write to '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to flush a sink at close time
    #[error("Failed to finalize '{path}': {source}")]
    FlushFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Worker task errors
#[derive(Error, Debug)]
pub enum WorkerError {
    /// A spawned isolate panicked instead of returning
    #[error("Worker {id} panicked: {message}")]
    Panicked { id: u64, message: String },
}

/// Result type alias for WalkerError
pub type Result<T> = std::result::Result<T, WalkerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let cfg_err = ConfigError::EmptyMarker;
        let walker_err: WalkerError = cfg_err.into();
        assert!(matches!(walker_err, WalkerError::Config(_)));
    }

    #[test]
    fn test_sink_error_names_path() {
        let err = SinkError::CreateFailed {
            path: PathBuf::from("/data/output.txt"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("/data/output.txt"));
    }
}
