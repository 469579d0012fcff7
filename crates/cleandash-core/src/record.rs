//! Scanned file and dependency records.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::format::{format_megabytes, format_timestamp};

/// Metadata for one regular file found during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// File name (not full path).
    pub filename: CompactString,

    /// Full path as produced by the walk.
    pub path: PathBuf,

    /// Size in bytes.
    pub size: u64,

    /// Last modification time.
    pub modified: SystemTime,
}

impl FileRecord {
    /// Create a new file record.
    pub fn new(
        filename: impl Into<CompactString>,
        path: impl Into<PathBuf>,
        size: u64,
        modified: SystemTime,
    ) -> Self {
        Self {
            filename: filename.into(),
            path: path.into(),
            size,
            modified,
        }
    }

    /// Size as a two-decimal megabyte string.
    pub fn size_display(&self) -> String {
        format_megabytes(self.size)
    }

    /// Modification time as a local timestamp string.
    pub fn modified_display(&self) -> String {
        format_timestamp(self.modified)
    }

    /// The (filename, size) pair duplicates are grouped by.
    pub fn duplicate_key(&self) -> (&str, u64) {
        (self.filename.as_str(), self.size)
    }
}

/// Import relationships found for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    /// The analysed source file.
    pub file: PathBuf,

    /// Imported module names.
    pub imports: BTreeSet<String>,

    /// Module names of source files considered local to this one.
    pub local_dependencies: BTreeSet<String>,
}

impl DependencyRecord {
    /// Create a new dependency record.
    pub fn new(
        file: impl AsRef<Path>,
        imports: BTreeSet<String>,
        local_dependencies: BTreeSet<String>,
    ) -> Self {
        Self {
            file: file.as_ref().to_path_buf(),
            imports,
            local_dependencies,
        }
    }

    /// Imports joined for display, e.g. `"os, sys"`.
    pub fn imports_display(&self) -> String {
        join(&self.imports)
    }

    /// Local dependencies joined for display.
    pub fn local_dependencies_display(&self) -> String {
        join(&self.local_dependencies)
    }
}

fn join(set: &BTreeSet<String>) -> String {
    set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
