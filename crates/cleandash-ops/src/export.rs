//! CSV export of selected duplicate entries.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use cleandash_core::FileRecord;

use crate::error::OpsError;

/// Header row of every export.
pub const CSV_HEADER: [&str; 4] = ["Filename", "Path", "Size (MB)", "Last Modified"];

/// File name of an export created at `at`: `data_<YYYY-MM-DD_HH-MM-SS>.csv`.
pub fn export_file_name(at: DateTime<Local>) -> String {
    format!("data_{}.csv", at.format("%Y-%m-%d_%H-%M-%S"))
}

/// Writes selected entries to a timestamped CSV file.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new(".")
    }
}

impl CsvExporter {
    /// Create an exporter writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Directory exports are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export `selection` in the given order, stamped with the current time.
    pub fn export(&self, selection: &[FileRecord]) -> Result<PathBuf, OpsError> {
        self.export_at(selection, Local::now())
    }

    /// Export `selection` in the given order, stamped with `at`.
    ///
    /// Returns the path of the written file.
    pub fn export_at(
        &self,
        selection: &[FileRecord],
        at: DateTime<Local>,
    ) -> Result<PathBuf, OpsError> {
        if selection.is_empty() {
            return Err(OpsError::EmptySelection);
        }

        let path = self.output_dir.join(export_file_name(at));
        let csv_err = |source| OpsError::Csv {
            path: path.clone(),
            source,
        };

        let mut writer = csv::Writer::from_path(&path).map_err(csv_err)?;
        writer.write_record(CSV_HEADER).map_err(csv_err)?;
        for record in selection {
            writer
                .write_record([
                    record.filename.to_string(),
                    record.path.to_string_lossy().into_owned(),
                    record.size_display(),
                    record.modified_display(),
                ])
                .map_err(csv_err)?;
        }
        writer.flush().map_err(|e| OpsError::write(&path, e))?;

        info!(file = %path.display(), rows = selection.len(), "exported selection");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_export_file_name() {
        let at = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(export_file_name(at), "data_2024-01-02_03-04-05.csv");
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = CsvExporter::new(temp.path()).export(&[]).unwrap_err();
        assert!(matches!(err, OpsError::EmptySelection));
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }
}
