//! Core types and traits for cleandash.
//!
//! This crate provides the data structures shared by the scanner, the
//! analyzers and the file operations: scanned file records, dependency
//! records, scan configuration and the error types.

mod config;
mod error;
mod format;
mod record;
mod scan;

pub use config::{DEFAULT_EXCLUDED_NAMES, ScanConfig, ScanConfigBuilder};
pub use error::{ParseError, ScanError, ScanWarning, WarningKind};
pub use format::{format_megabytes, format_timestamp};
pub use record::{DependencyRecord, FileRecord};
pub use scan::{ScanResult, ScanStats};
