//! Per-file dependency analysis.
//!
//! Each source file is read, its imports extracted and its local
//! dependencies resolved. A file that cannot be read or parsed produces a
//! [`SkippedSource`] instead of a record; the remaining files are still
//! analyzed.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;
use tracing::{debug, warn};

use cleandash_core::{DependencyRecord, ParseError};

use crate::imports::{ImportExtractor, PythonImportExtractor};
use crate::local_deps::{LocalDependencyMode, LocalDependencyResolver};

/// Column the dependency listing is sorted by. Sorting is ascending.
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
pub enum DependencySortKey {
    #[default]
    File,
    Imports,
    LocalDependencies,
}

impl DependencySortKey {
    /// Resolve a key name, falling back to [`DependencySortKey::File`].
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!(key = name, "unknown dependency sort key, using file");
            Self::default()
        })
    }

    fn compare(self, a: &DependencyRecord, b: &DependencyRecord) -> Ordering {
        match self {
            // Path text, not components: `b-c.py` sorts before `b/c.py`.
            Self::File => a.file.as_os_str().cmp(b.file.as_os_str()),
            Self::Imports => a.imports.cmp(&b.imports),
            Self::LocalDependencies => a.local_dependencies.cmp(&b.local_dependencies),
        }
    }
}

/// Configuration for dependency analysis.
#[derive(Debug, Clone, Default, Builder)]
#[builder(setter(into))]
pub struct DependencyConfig {
    /// Sort order of the resulting records.
    #[builder(default)]
    pub sort_key: DependencySortKey,

    /// How local dependencies are matched.
    #[builder(default)]
    pub local_mode: LocalDependencyMode,
}

impl DependencyConfig {
    /// Create a new config builder.
    pub fn builder() -> DependencyConfigBuilder {
        DependencyConfigBuilder::default()
    }
}

/// Why a source file was left out of the dependency report.
#[derive(Debug, Error)]
pub enum SkipReason {
    /// The file could not be read as text.
    #[error("could not read file: {0}")]
    Unreadable(#[from] std::io::Error),

    /// The file is not valid source.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A source file that produced no record.
#[derive(Debug, Serialize)]
pub struct SkippedSource {
    /// The skipped file.
    pub path: PathBuf,
    /// What went wrong. Serialized as its message.
    #[serde(serialize_with = "serialize_display")]
    pub reason: SkipReason,
}

fn serialize_display<S: serde::Serializer>(
    value: &impl std::fmt::Display,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Results from dependency analysis.
#[derive(Debug, Serialize)]
pub struct DependencyReport {
    /// One record per successfully analyzed file, sorted.
    pub records: Vec<DependencyRecord>,

    /// Files that could not be analyzed, in input order.
    pub skipped: Vec<SkippedSource>,

    /// Key the records are sorted by.
    pub sort_key: DependencySortKey,
}

/// Dependency analyzer over a list of source files.
pub struct DependencyAnalyzer<E = PythonImportExtractor> {
    extractor: E,
    resolver: LocalDependencyResolver,
    sort_key: DependencySortKey,
}

impl DependencyAnalyzer {
    /// Create a Python analyzer with default config.
    pub fn new() -> Self {
        Self::with_config(DependencyConfig::default())
    }

    /// Create a Python analyzer with custom config.
    pub fn with_config(config: DependencyConfig) -> Self {
        Self::with_extractor(PythonImportExtractor::new(), config)
    }
}

impl Default for DependencyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ImportExtractor> DependencyAnalyzer<E> {
    /// Create an analyzer around any import extractor.
    pub fn with_extractor(extractor: E, config: DependencyConfig) -> Self {
        Self {
            extractor,
            resolver: LocalDependencyResolver::with_mode(config.local_mode),
            sort_key: config.sort_key,
        }
    }

    /// Analyze one file against the full list of source files.
    pub fn analyze_file(
        &self,
        path: &Path,
        candidates: &[PathBuf],
    ) -> Result<DependencyRecord, SkipReason> {
        let content = std::fs::read_to_string(path)?;
        let imports = self.extractor.extract_imports(&content)?;
        let local_dependencies = self.resolver.resolve(path, candidates, &imports);
        Ok(DependencyRecord::new(path, imports, local_dependencies))
    }

    /// Analyze every file in `sources`, each against all of `sources`.
    pub fn analyze(&self, sources: &[PathBuf]) -> DependencyReport {
        let mut records = Vec::with_capacity(sources.len());
        let mut skipped = Vec::new();

        for path in sources {
            match self.analyze_file(path, sources) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    debug!(path = %path.display(), %reason, "skipping source file");
                    skipped.push(SkippedSource {
                        path: path.clone(),
                        reason,
                    });
                }
            }
        }

        records.sort_by(|a, b| self.sort_key.compare(a, b));

        DependencyReport {
            records,
            skipped,
            sort_key: self.sort_key,
        }
    }
}
