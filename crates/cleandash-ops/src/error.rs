//! Error types for file operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::deletion::DeletionState;

/// Errors returned by exports, log writes and deletion sessions.
#[derive(Debug, Error)]
pub enum OpsError {
    /// The operation needs at least one selected entry.
    #[error("No files selected")]
    EmptySelection,

    /// A deletion session step was requested in the wrong state.
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        state: DeletionState,
        action: &'static str,
    },

    /// Writing a file failed.
    #[error("Could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding or writing CSV failed.
    #[error("Could not export to {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl OpsError {
    /// Create a write error with path context.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// A single file that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationError {
    /// The path that caused the error.
    pub path: PathBuf,
    /// A human-readable error message.
    pub message: String,
}

impl OperationError {
    /// Create a new operation error.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for OperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Could not delete {}: {}", self.path.display(), self.message)
    }
}
