//! Scan result container and statistics.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::error::ScanWarning;
use crate::record::FileRecord;

/// Summary statistics for one scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    /// Files reported in the result.
    pub total_files: u64,
    /// Sum of reported file sizes in bytes.
    pub total_size: u64,
    /// Directories walked (root excluded).
    pub total_dirs: u64,
    /// Files left out by the hidden-name or denylist filter.
    pub filtered_files: u64,
}

impl ScanStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reported file.
    pub fn record_file(&mut self, size: u64) {
        self.total_files += 1;
        self.total_size += size;
    }

    /// Record a walked directory.
    pub fn record_dir(&mut self) {
        self.total_dirs += 1;
    }

    /// Record a file removed by name filtering.
    pub fn record_filtered(&mut self) {
        self.filtered_files += 1;
    }
}

/// Records produced by one scan of a directory tree.
///
/// A result is never updated in place; every analysis run builds a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Root path that was scanned.
    pub root: PathBuf,

    /// Scanned files in walk order.
    pub records: Vec<FileRecord>,

    /// When this scan was performed.
    pub scanned_at: SystemTime,

    /// Duration of the scan.
    pub scan_duration: Duration,

    /// Summary statistics.
    pub stats: ScanStats,

    /// Entries skipped because they could not be read or stat'ed.
    pub warnings: Vec<ScanWarning>,
}

impl ScanResult {
    /// Create a new scan result.
    pub fn new(
        root: PathBuf,
        records: Vec<FileRecord>,
        stats: ScanStats,
        scan_duration: Duration,
        warnings: Vec<ScanWarning>,
    ) -> Self {
        Self {
            root,
            records,
            scanned_at: SystemTime::now(),
            scan_duration,
            stats,
            warnings,
        }
    }

    /// Number of reported files.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no file was reported.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check if any entry was skipped.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
