//! Append-only deletion log.
//!
//! Each batch of deletions appends a block of the form:
//!
//! ```text
//! Deleted Files - 2024-05-01 14:03:22:
//! /data/a/report.txt
//! /data/b/report.txt
//!
//! ```
//!
//! The file is only ever opened in append mode; it is never truncated or
//! rotated.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::error::OpsError;

/// Log file name used when none is given, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "logs.txt";

/// Persistent record of deleted files.
#[derive(Debug, Clone)]
pub struct DeletionLog {
    path: PathBuf,
}

impl Default for DeletionLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILE)
    }
}

impl DeletionLog {
    /// Create a log writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one block listing `paths` under a header stamped with `at`.
    pub fn append(&self, paths: &[PathBuf], at: DateTime<Local>) -> Result<(), OpsError> {
        let block = format_block(paths, at);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| OpsError::write(&self.path, e))?;
        file.write_all(block.as_bytes())
            .map_err(|e| OpsError::write(&self.path, e))?;

        debug!(log = %self.path.display(), entries = paths.len(), "deletion log appended");
        Ok(())
    }
}

fn format_block(paths: &[PathBuf], at: DateTime<Local>) -> String {
    let mut block = format!("Deleted Files - {}:\n", at.format("%Y-%m-%d %H:%M:%S"));
    for path in paths {
        block.push_str(&path.to_string_lossy());
        block.push('\n');
    }
    block.push('\n');
    block
}
