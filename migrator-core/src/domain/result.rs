//! Result and error types for the core library

use std::path::PathBuf;

use thiserror::Error;

/// Core library error type
///
/// Failures inside a run carry the directory, file or version in flight.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to find migration files in {}", .dir.display())]
    Discovery {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read migration file {file}")]
    Read {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Database error: {0}")]
    Store(String),

    #[error("Failed to execute migration {file}")]
    Execution {
        file: String,
        #[source]
        source: ExecutionError,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to {action} migration version {version}")]
    Version {
        action: &'static str,
        version: String,
        #[source]
        source: Box<Error>,
    },

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a database error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Failure while applying one script inside its transaction
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("failed to begin transaction: {0}")]
    Begin(String),

    #[error("migration execution failed at statement {index}: {message}")]
    Statement { index: usize, message: String },

    #[error("rollback failed: {rollback}, original error at statement {index}: {message}")]
    Rollback {
        index: usize,
        message: String,
        rollback: String,
    },

    #[error("failed to commit transaction: {0}")]
    Commit(String),
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
