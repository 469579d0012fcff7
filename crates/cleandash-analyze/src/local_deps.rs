//! Local dependency resolution.
//!
//! A source file's "local dependencies" are the other source files that live
//! in its directory or below it. In the default [`LocalDependencyMode::Containment`]
//! mode this is a pure path check: whether the file actually imports the
//! candidate is never consulted. [`LocalDependencyMode::Imported`] narrows the
//! result to candidates whose module name appears in the file's imports.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How candidate files are matched against the current file.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LocalDependencyMode {
    /// Every other file in the same directory subtree.
    #[default]
    Containment,
    /// Files in the subtree whose module name is a component of an import.
    Imported,
}

/// Resolver for local dependencies.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDependencyResolver {
    mode: LocalDependencyMode,
}

impl LocalDependencyResolver {
    /// Create a resolver using directory containment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with the given matching mode.
    pub fn with_mode(mode: LocalDependencyMode) -> Self {
        Self { mode }
    }

    /// The active matching mode.
    pub fn mode(&self) -> LocalDependencyMode {
        self.mode
    }

    /// Module names of the candidates local to `current`.
    ///
    /// `imports` is only consulted in [`LocalDependencyMode::Imported`].
    pub fn resolve(
        &self,
        current: &Path,
        candidates: &[PathBuf],
        imports: &BTreeSet<String>,
    ) -> BTreeSet<String> {
        let current_dir = current.parent().unwrap_or_else(|| Path::new(""));

        candidates
            .iter()
            .filter(|candidate| candidate.as_path() != current)
            .filter(|candidate| candidate.starts_with(current_dir))
            .filter_map(|candidate| module_name(candidate))
            .filter(|module| match self.mode {
                LocalDependencyMode::Containment => true,
                LocalDependencyMode::Imported => is_imported(module, imports),
            })
            .collect()
    }
}

/// File name without its extension.
pub fn module_name(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

fn is_imported(module: &str, imports: &BTreeSet<String>) -> bool {
    imports
        .iter()
        .any(|import| import.split('.').any(|part| part == module))
}
