//! File system scanning engine for cleandash.
//!
//! This crate walks a directory tree with jwalk and turns every regular file
//! into a [`FileRecord`]. Walking is serial: a scan runs entirely on the
//! calling thread.
//!
//! # Overview
//!
//! - Hidden file names and the OS artifact denylist are filtered out
//! - Entries that cannot be stat'ed are skipped and kept as warnings
//! - Source files for dependency analysis are listed separately
//!
//! # Example
//!
//! ```rust,no_run
//! use cleandash_scan::{FileScanner, ScanConfig};
//!
//! let config = ScanConfig::new("/path/to/scan");
//! let scanner = FileScanner::new();
//! let result = scanner.scan(&config).unwrap();
//!
//! println!("Scanned {} files", result.len());
//! println!("Skipped {} entries", result.warnings.len());
//! ```

mod scanner;

pub use scanner::FileScanner;

// Re-export core types for convenience
pub use cleandash_core::{
    FileRecord, ScanConfig, ScanError, ScanResult, ScanStats, ScanWarning, WarningKind,
};
