//! Result sink trait and error types
//!
//! A sink receives the whole batch once the engine has finished with it.

use crate::checker::BatchResult;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Consumer of a finished batch
pub trait ResultSink {
    /// Short name used in log messages
    fn name(&self) -> &str;

    /// Exports every `(url, outcome)` pair of the batch in input order
    fn write_batch(&mut self, batch: &BatchResult) -> OutputResult<()>;
}
