//! Duplicate file detection by name and size.
//!
//! Files are bucketed by `(filename, size)`. Every file whose bucket has at
//! least one other member is reported. File contents are never read, so two
//! unrelated files that happen to share a name and a size are reported as
//! duplicates.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use tracing::{debug, warn};

use cleandash_core::FileRecord;

/// Column the duplicate listing is sorted by. Sorting is always descending.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DuplicateSortKey {
    #[default]
    Filename,
    Path,
    /// Sorts on the formatted megabyte string, not on the byte count:
    /// `"2.00 MB"` ranks above `"10.00 MB"`.
    Size,
    /// Sorts on the formatted local timestamp string.
    LastModified,
}

impl DuplicateSortKey {
    /// Resolve a key name, falling back to [`DuplicateSortKey::Filename`]
    /// for anything unrecognised.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!(key = name, "unknown duplicate sort key, using filename");
            Self::default()
        })
    }

    /// The displayed value this key compares.
    fn sort_value(self, record: &FileRecord) -> String {
        match self {
            Self::Filename => record.filename.to_string(),
            Self::Path => record.path.to_string_lossy().into_owned(),
            Self::Size => record.size_display(),
            Self::LastModified => record.modified_display(),
        }
    }
}

/// Results from duplicate analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateReport {
    /// Every file that shares its name and size with another file, sorted.
    pub entries: Vec<FileRecord>,

    /// Number of distinct `(filename, size)` buckets with 2+ members.
    pub group_count: usize,

    /// Number of files analyzed.
    pub files_analyzed: u64,

    /// Key the entries are sorted by.
    pub sort_key: DuplicateSortKey,
}

impl DuplicateReport {
    /// Check if any duplicates were found.
    pub fn has_duplicates(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Sum of the sizes of all reported entries.
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|r| r.size).sum()
    }
}

/// Name+size duplicate grouper.
#[derive(Debug, Clone, Default)]
pub struct DuplicateGrouper {
    sort_key: DuplicateSortKey,
}

impl DuplicateGrouper {
    /// Create a grouper sorting by filename.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grouper with the given sort key.
    pub fn with_sort_key(sort_key: DuplicateSortKey) -> Self {
        Self { sort_key }
    }

    /// Find name+size duplicates among the records of one scan.
    pub fn find_duplicates(&self, records: &[FileRecord]) -> DuplicateReport {
        let groups = group_by_name_and_size(records);

        let mut group_count = 0;
        let mut entries = Vec::new();
        for members in groups.into_values() {
            if members.len() < 2 {
                continue;
            }
            group_count += 1;
            entries.extend(members.into_iter().cloned());
        }

        sort_entries(&mut entries, self.sort_key);

        debug!(
            files = records.len(),
            groups = group_count,
            entries = entries.len(),
            "duplicate grouping finished"
        );

        DuplicateReport {
            entries,
            group_count,
            files_analyzed: records.len() as u64,
            sort_key: self.sort_key,
        }
    }
}

/// Bucket records by `(filename, size)`, keeping first-seen bucket order and
/// walk order within a bucket.
fn group_by_name_and_size(records: &[FileRecord]) -> IndexMap<(&str, u64), Vec<&FileRecord>> {
    let mut groups: IndexMap<(&str, u64), Vec<&FileRecord>> = IndexMap::new();
    for record in records {
        groups.entry(record.duplicate_key()).or_default().push(record);
    }
    groups
}

/// Sort entries descending by the displayed value of `key`.
///
/// The sort is stable: entries with equal values keep their relative order.
pub fn sort_entries(entries: &mut [FileRecord], key: DuplicateSortKey) {
    entries.sort_by_cached_key(|record| std::cmp::Reverse(key.sort_value(record)));
}
