//! Deletion of selected files, gated by an explicit confirmation step.
//!
//! A [`DeletionSession`] walks through
//! `Idle -> Selected -> ConfirmPending -> Deleting -> Refreshed`.
//! Cancelling from any state before `Deleting` returns to `Idle` without
//! touching the filesystem.

use std::path::PathBuf;

use chrono::Local;
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, info, warn};

use crate::error::{OperationError, OpsError};
use crate::log::DeletionLog;

/// Where a deletion session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
pub enum DeletionState {
    #[default]
    #[strum(to_string = "idle")]
    Idle,
    #[strum(to_string = "files are selected")]
    Selected,
    #[strum(to_string = "awaiting confirmation")]
    ConfirmPending,
    #[strum(to_string = "deleting")]
    Deleting,
    #[strum(to_string = "refreshed")]
    Refreshed,
}

/// Result of a deletion batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionOutcome {
    /// Files that were removed.
    pub deleted: Vec<PathBuf>,
    /// Files that could not be removed.
    pub failed: Vec<OperationError>,
    /// Set when the deletions succeeded but the log could not be written.
    pub log_error: Option<String>,
}

impl DeletionOutcome {
    /// True when every selected file was removed and logged.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.log_error.is_none()
    }

    /// One-line summary followed by one line per failure.
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Deleted {} files", self.deleted.len())];
        lines.extend(self.failed.iter().map(ToString::to_string));
        if let Some(err) = &self.log_error {
            lines.push(format!("Could not update deletion log: {err}"));
        }
        lines.join("\n")
    }
}

/// Remove each file independently. A failure on one path never stops the
/// others.
pub fn delete_files(paths: &[PathBuf]) -> DeletionOutcome {
    let mut outcome = DeletionOutcome::default();

    for path in paths {
        match std::fs::remove_file(path) {
            Ok(()) => {
                debug!(path = %path.display(), "deleted");
                outcome.deleted.push(path.clone());
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "delete failed");
                outcome.failed.push(OperationError::new(path, e.to_string()));
            }
        }
    }

    outcome
}

/// Selection and confirmation state for one deletion.
#[derive(Debug, Default)]
pub struct DeletionSession {
    state: DeletionState,
    selection: Vec<PathBuf>,
}

impl DeletionSession {
    /// Create an idle session with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn state(&self) -> DeletionState {
        self.state
    }

    /// Paths awaiting deletion, in selection order.
    pub fn selection(&self) -> &[PathBuf] {
        &self.selection
    }

    /// Replace the selection. An empty selection puts the session back to
    /// `Idle`.
    pub fn select(&mut self, paths: Vec<PathBuf>) {
        self.state = if paths.is_empty() {
            DeletionState::Idle
        } else {
            DeletionState::Selected
        };
        self.selection = paths;
    }

    /// Ask for confirmation of the current selection.
    pub fn request_confirmation(&mut self) -> Result<(), OpsError> {
        if self.selection.is_empty() {
            return Err(OpsError::EmptySelection);
        }
        if self.state != DeletionState::Selected {
            return Err(OpsError::InvalidTransition {
                state: self.state,
                action: "request confirmation",
            });
        }

        self.state = DeletionState::ConfirmPending;
        Ok(())
    }

    /// Abandon the selection without deleting anything.
    pub fn cancel(&mut self) {
        if self.state != DeletionState::Idle {
            debug!(selected = self.selection.len(), "deletion cancelled");
        }
        self.selection.clear();
        self.state = DeletionState::Idle;
    }

    /// Delete the confirmed selection, log what was removed, then run
    /// `refresh` so callers can rebuild their view from disk.
    ///
    /// The log is written only when at least one file was deleted. A log
    /// failure is reported in the outcome rather than as an error since the
    /// files are already gone.
    pub fn confirm<R>(
        &mut self,
        log: &DeletionLog,
        refresh: impl FnOnce() -> R,
    ) -> Result<(DeletionOutcome, R), OpsError> {
        if self.state != DeletionState::ConfirmPending {
            return Err(OpsError::InvalidTransition {
                state: self.state,
                action: "confirm deletion",
            });
        }

        self.state = DeletionState::Deleting;
        let selection = std::mem::take(&mut self.selection);
        let mut outcome = delete_files(&selection);

        if !outcome.deleted.is_empty()
            && let Err(e) = log.append(&outcome.deleted, Local::now())
        {
            warn!(error = %e, "deletion log not updated");
            outcome.log_error = Some(e.to_string());
        }

        info!(
            deleted = outcome.deleted.len(),
            failed = outcome.failed.len(),
            "deletion finished"
        );

        let refreshed = refresh();
        self.state = DeletionState::Refreshed;
        Ok((outcome, refreshed))
    }
}
