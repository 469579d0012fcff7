//! File operations for cleandash.
//!
//! This crate acts on entries picked from a duplicate report:
//!
//! - [`DeletionSession`] deletes a selection after explicit confirmation
//! - [`DeletionLog`] appends a timestamped record of every deletion batch
//! - [`CsvExporter`] writes a selection to a timestamped CSV file

mod deletion;
mod error;
mod export;
mod log;

pub use deletion::{DeletionOutcome, DeletionSession, DeletionState, delete_files};
pub use error::{OperationError, OpsError};
pub use export::{CSV_HEADER, CsvExporter, export_file_name};
pub use log::{DEFAULT_LOG_FILE, DeletionLog};

pub use cleandash_core::FileRecord;
