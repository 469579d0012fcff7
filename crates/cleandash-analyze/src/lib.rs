//! Analysis algorithms for cleandash.
//!
//! This crate provides the two analyses run over a scanned tree:
//!
//! - **Duplicate detection** - Group files by name and size
//! - **Dependency analysis** - Extract Python imports and list local modules
//!
//! # Duplicate Detection
//!
//! Files sharing both their name and their byte size are reported as
//! duplicates. Contents are never compared.
//!
//! ```rust,ignore
//! use cleandash_analyze::{DuplicateGrouper, DuplicateSortKey};
//! use cleandash_scan::{FileScanner, ScanConfig};
//!
//! let scan = FileScanner::new().scan(&ScanConfig::new("/path/to/scan")).unwrap();
//!
//! let grouper = DuplicateGrouper::with_sort_key(DuplicateSortKey::Path);
//! let report = grouper.find_duplicates(&scan.records);
//!
//! println!("Found {} duplicate groups", report.group_count);
//! ```
//!
//! # Dependency Analysis
//!
//! ```rust,ignore
//! use cleandash_analyze::DependencyAnalyzer;
//! use cleandash_scan::{FileScanner, ScanConfig};
//!
//! let sources = FileScanner::new().source_files(&ScanConfig::new("/project")).unwrap();
//! let report = DependencyAnalyzer::new().analyze(&sources);
//!
//! for record in &report.records {
//!     println!("{}: {}", record.file.display(), record.imports_display());
//! }
//! ```

mod dependencies;
mod duplicates;
mod imports;
mod local_deps;

pub use dependencies::{
    DependencyAnalyzer, DependencyConfig, DependencyConfigBuilder, DependencyReport,
    DependencySortKey, SkipReason, SkippedSource,
};
pub use duplicates::{DuplicateGrouper, DuplicateReport, DuplicateSortKey, sort_entries};
pub use imports::{ImportExtractor, PythonImportExtractor};
pub use local_deps::{LocalDependencyMode, LocalDependencyResolver, module_name};

// Re-export core types
pub use cleandash_core::{DependencyRecord, FileRecord, ParseError};
