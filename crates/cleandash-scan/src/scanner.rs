//! JWalk-based directory scanner.

use std::path::{Path, PathBuf};
use std::time::{Instant, UNIX_EPOCH};

use compact_str::CompactString;
use jwalk::{DirEntry, Parallelism, WalkDir};
use tracing::debug;

use cleandash_core::{FileRecord, ScanConfig, ScanError, ScanResult, ScanStats, ScanWarning};

/// Scanner producing one [`FileRecord`] per regular file in a tree.
#[derive(Debug, Default)]
pub struct FileScanner;

impl FileScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// Perform a scan of the configured root.
    ///
    /// Hidden and denylisted file names are filtered before stat. A file whose
    /// stat fails is left out of the records and noted in `warnings`; only an
    /// unusable root is reported as an error.
    pub fn scan(&self, config: &ScanConfig) -> Result<ScanResult, ScanError> {
        let start = Instant::now();
        check_root(&config.root)?;

        let mut stats = ScanStats::new();
        let mut warnings = Vec::new();
        let mut records = Vec::new();

        for entry_result in walker(config) {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                    debug!(path = %path.display(), error = %err, "skipping unreadable entry");
                    warnings.push(ScanWarning::read_error(path, &err));
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                stats.record_dir();
                continue;
            }
            if !file_type.is_file() && !file_type.is_symlink() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().to_string();
            if config.should_skip_file(&file_name) {
                stats.record_filtered();
                continue;
            }

            let path = entry.path();
            match file_record(&entry, file_name, &path) {
                Ok(Some(record)) => {
                    stats.record_file(record.size);
                    records.push(record);
                }
                // Symlink to a directory
                Ok(None) => {}
                Err(warning) => {
                    debug!(path = %path.display(), reason = %warning.message, "skipping file");
                    warnings.push(warning);
                }
            }
        }

        let scan_duration = start.elapsed();
        debug!(
            root = %config.root.display(),
            files = stats.total_files,
            skipped = warnings.len(),
            elapsed_ms = scan_duration.as_millis() as u64,
            "scan finished"
        );

        Ok(ScanResult::new(
            config.root.clone(),
            records,
            stats,
            scan_duration,
            warnings,
        ))
    }

    /// List the source files under the configured root in walk order.
    ///
    /// Only the extension is checked; hidden and denylisted names are kept.
    pub fn source_files(&self, config: &ScanConfig) -> Result<Vec<PathBuf>, ScanError> {
        check_root(&config.root)?;

        let files = walker(config)
            .into_iter()
            .filter_map(|entry_result| match entry_result {
                Ok(entry) => Some(entry),
                Err(err) => {
                    debug!(error = %err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| {
                config.is_source_file(&entry.file_name().to_string_lossy())
                    && is_file_or_link_to_file(entry)
            })
            .map(|entry| entry.path())
            .collect();

        Ok(files)
    }
}

/// Verify the root exists and is a directory.
fn check_root(root: &Path) -> Result<(), ScanError> {
    let metadata = std::fs::metadata(root).map_err(|e| ScanError::io(root, e))?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

fn walker(config: &ScanConfig) -> WalkDir {
    // Hidden names are filtered per file; hidden directories are still walked.
    WalkDir::new(&config.root)
        .parallelism(Parallelism::Serial)
        .skip_hidden(false)
        .follow_links(config.follow_symlinks)
        .min_depth(1)
        .max_depth(config.max_depth.map(|d| d as usize).unwrap_or(usize::MAX))
}

fn is_file_or_link_to_file(entry: &DirEntry<((), ())>) -> bool {
    let file_type = entry.file_type();
    file_type.is_file()
        || (file_type.is_symlink()
            && std::fs::metadata(entry.path()).is_ok_and(|m| m.is_file()))
}

/// Stat an entry and build its record.
///
/// Symlinks are stat'ed through to their target. A link to a directory
/// yields `None`; a dangling link fails like any other stat.
fn file_record(
    entry: &DirEntry<((), ())>,
    file_name: String,
    path: &Path,
) -> Result<Option<FileRecord>, ScanWarning> {
    let metadata = if entry.file_type().is_symlink() {
        std::fs::metadata(path).map_err(|err| ScanWarning::stat_failed(path, &err))?
    } else {
        entry.metadata().map_err(|err| match err.io_error() {
            Some(io) => ScanWarning::stat_failed(path, io),
            None => ScanWarning::read_error(path, &err),
        })?
    };
    if !metadata.is_file() {
        return Ok(None);
    }

    Ok(Some(FileRecord::new(
        CompactString::from(file_name),
        path,
        metadata.len(),
        metadata.modified().unwrap_or(UNIX_EPOCH),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("dir1")).unwrap();
        fs::create_dir(root.join("dir1/subdir")).unwrap();
        fs::create_dir(root.join(".cache")).unwrap();

        fs::write(root.join("file1.txt"), "hello").unwrap();
        fs::write(root.join("dir1/file2.txt"), "world world world").unwrap();
        fs::write(root.join("dir1/subdir/file3.txt"), "test").unwrap();
        fs::write(root.join(".cache/blob.bin"), "cached").unwrap();

        fs::write(root.join(".hidden"), "secret").unwrap();
        fs::write(root.join("Thumbs.db"), "thumbs").unwrap();
        fs::write(root.join("dir1/desktop.ini"), "[.ShellClassInfo]").unwrap();

        temp
    }

    fn names(result: &ScanResult) -> Vec<String> {
        let mut names: Vec<String> = result
            .records
            .iter()
            .map(|r| r.filename.to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_basic_scan() {
        let temp = create_test_tree();
        let result = FileScanner::new().scan(&ScanConfig::new(temp.path())).unwrap();

        assert_eq!(
            names(&result),
            vec!["blob.bin", "file1.txt", "file2.txt", "file3.txt"]
        );
        assert_eq!(result.stats.total_files, 4);
        assert_eq!(result.stats.total_dirs, 3);
        assert_eq!(result.stats.filtered_files, 3);
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_records_carry_size_and_path() {
        let temp = create_test_tree();
        let result = FileScanner::new().scan(&ScanConfig::new(temp.path())).unwrap();

        let record = result
            .records
            .iter()
            .find(|r| r.filename == "file2.txt")
            .unwrap();
        assert_eq!(record.size, 17);
        assert_eq!(record.path, temp.path().join("dir1/file2.txt"));
        assert!(record.path.exists());
    }

    #[test]
    fn test_include_hidden() {
        let temp = create_test_tree();
        let config = ScanConfig::builder()
            .root(temp.path())
            .include_hidden(true)
            .build()
            .unwrap();

        let result = FileScanner::new().scan(&config).unwrap();
        assert!(result.records.iter().any(|r| r.filename == ".hidden"));
        assert!(!result.records.iter().any(|r| r.filename == "Thumbs.db"));
    }

    #[test]
    fn test_max_depth() {
        let temp = create_test_tree();
        let config = ScanConfig::builder()
            .root(temp.path())
            .max_depth(Some(1u32))
            .build()
            .unwrap();

        let result = FileScanner::new().scan(&config).unwrap();
        assert_eq!(names(&result), vec!["file1.txt"]);
    }

    #[test]
    fn test_missing_root() {
        let temp = TempDir::new().unwrap();
        let config = ScanConfig::new(temp.path().join("nope"));

        let err = FileScanner::new().scan(&config).unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[test]
    fn test_root_is_file() {
        let temp = create_test_tree();
        let config = ScanConfig::new(temp.path().join("file1.txt"));

        let err = FileScanner::new().scan(&config).unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_are_followed() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("a")).unwrap();
        fs::create_dir(root.join("b")).unwrap();
        fs::create_dir(root.join("c")).unwrap();
        fs::write(root.join("a/x.txt"), "data").unwrap();
        fs::write(root.join("real.txt"), "data").unwrap();
        symlink(root.join("real.txt"), root.join("b/x.txt")).unwrap();
        symlink(root.join("a"), root.join("c/linked_dir")).unwrap();
        symlink(root.join("missing.txt"), root.join("c/dangling.txt")).unwrap();

        let result = FileScanner::new().scan(&ScanConfig::new(root)).unwrap();
        assert_eq!(names(&result), vec!["real.txt", "x.txt", "x.txt"]);

        let link = result
            .records
            .iter()
            .find(|r| r.path == root.join("b/x.txt"))
            .unwrap();
        assert_eq!(link.size, 4);

        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].path, root.join("c/dangling.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_source_files_include_symlinks() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("lib")).unwrap();
        fs::write(root.join("lib/real.py"), "").unwrap();
        symlink(root.join("lib/real.py"), root.join("alias.py")).unwrap();
        symlink(root.join("gone.py"), root.join("broken.py")).unwrap();

        let mut files = FileScanner::new()
            .source_files(&ScanConfig::new(root))
            .unwrap();
        files.sort();

        assert_eq!(files, vec![root.join("alias.py"), root.join("lib/real.py")]);
    }

    #[test]
    fn test_source_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("pkg")).unwrap();
        fs::write(root.join("main.py"), "import os\n").unwrap();
        fs::write(root.join("pkg/util.py"), "").unwrap();
        fs::write(root.join("pkg/.private.py"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();
        fs::write(root.join("cache.pyc"), "").unwrap();

        let mut files = FileScanner::new()
            .source_files(&ScanConfig::new(root))
            .unwrap();
        files.sort();

        assert_eq!(
            files,
            vec![
                root.join("main.py"),
                root.join("pkg/.private.py"),
                root.join("pkg/util.py"),
            ]
        );
    }
}
