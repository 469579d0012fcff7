//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// OS artifact names that are never reported by a scan.
pub const DEFAULT_EXCLUDED_NAMES: [&str; 2] = ["desktop.ini", "Thumbs.db"];

/// Configuration for scanning operations.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Follow symbolic links.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Maximum depth to traverse (None = unlimited).
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Report files whose name starts with a dot.
    #[builder(default = "false")]
    #[serde(default)]
    pub include_hidden: bool,

    /// File names skipped by exact, case-sensitive match.
    #[builder(default = "default_excluded_names()")]
    #[serde(default = "default_excluded_names")]
    pub excluded_names: Vec<String>,

    /// Extension (without the dot) identifying source files for
    /// dependency analysis.
    #[builder(default = "default_source_extension()")]
    #[serde(default = "default_source_extension")]
    pub source_extension: String,
}

fn default_excluded_names() -> Vec<String> {
    DEFAULT_EXCLUDED_NAMES.iter().map(|s| s.to_string()).collect()
}

fn default_source_extension() -> String {
    "py".to_string()
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        if let Some(ref ext) = self.source_extension
            && (ext.is_empty() || ext.starts_with('.'))
        {
            return Err("Source extension must be non-empty and given without a dot".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_symlinks: false,
            max_depth: None,
            include_hidden: false,
            excluded_names: default_excluded_names(),
            source_extension: default_source_extension(),
        }
    }

    /// Check whether a file with this name is left out of scan results.
    pub fn should_skip_file(&self, name: &str) -> bool {
        (!self.include_hidden && name.starts_with('.'))
            || self.excluded_names.iter().any(|n| n == name)
    }

    /// Check whether a file name marks a source file.
    pub fn is_source_file(&self, name: &str) -> bool {
        name.strip_suffix(self.source_extension.as_str())
            .is_some_and(|stem| stem.ends_with('.'))
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ScanConfig::builder()
            .root("/home/user")
            .follow_symlinks(true)
            .max_depth(Some(3u32))
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert!(config.follow_symlinks);
        assert_eq!(config.max_depth, Some(3));
        assert_eq!(config.source_extension, "py");
        assert_eq!(config.excluded_names.len(), 2);
    }

    #[test]
    fn test_builder_rejects_empty_root() {
        assert!(ScanConfig::builder().root("").build().is_err());
        assert!(ScanConfig::builder().build().is_err());
    }

    #[test]
    fn test_builder_rejects_dotted_extension() {
        let result = ScanConfig::builder()
            .root("/test")
            .source_extension(".py")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_should_skip_file() {
        let mut config = ScanConfig::new("/test");

        assert!(config.should_skip_file(".DS_Store"));
        assert!(config.should_skip_file("desktop.ini"));
        assert!(config.should_skip_file("Thumbs.db"));
        assert!(!config.should_skip_file("thumbs.db"));
        assert!(!config.should_skip_file("notes.txt"));

        config.include_hidden = true;
        assert!(!config.should_skip_file(".env"));
        assert!(config.should_skip_file("Thumbs.db"));
    }

    #[test]
    fn test_is_source_file() {
        let config = ScanConfig::new("/test");
        assert!(config.is_source_file("main.py"));
        assert!(config.is_source_file(".hidden.py"));
        assert!(!config.is_source_file("main.pyc"));
        assert!(!config.is_source_file("copy"));
        assert!(!config.is_source_file("py"));
    }
}
