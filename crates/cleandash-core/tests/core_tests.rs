use cleandash_core::{
    DEFAULT_EXCLUDED_NAMES, DependencyRecord, FileRecord, ParseError, ScanConfig, ScanWarning,
    WarningKind, format_megabytes,
};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::SystemTime;

#[test]
fn test_file_record_equality() {
    let now = SystemTime::now();
    let a = FileRecord::new("report.pdf", "/docs/report.pdf", 4096, now);
    let b = FileRecord::new("report.pdf", "/docs/report.pdf", 4096, now);
    let c = FileRecord::new("report.pdf", "/backup/report.pdf", 4096, now);

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.duplicate_key(), c.duplicate_key());
}

#[test]
fn test_size_display_matches_formatter() {
    let record = FileRecord::new("big.iso", "/big.iso", 734_003_200, SystemTime::now());
    assert_eq!(record.size_display(), format_megabytes(734_003_200));
    assert_eq!(record.size_display(), "700.00 MB");
}

#[test]
fn test_default_config_denylist() {
    let config = ScanConfig::default();
    assert_eq!(config.root, PathBuf::from("."));
    assert!(!config.include_hidden);
    for name in DEFAULT_EXCLUDED_NAMES {
        assert!(config.should_skip_file(name));
    }
}

#[test]
fn test_config_serde_defaults() {
    let config: ScanConfig = serde_json::from_str(r#"{"root": "/data"}"#).unwrap();

    assert_eq!(config.root, PathBuf::from("/data"));
    assert!(!config.follow_symlinks);
    assert_eq!(config.max_depth, None);
    assert_eq!(config.source_extension, "py");
    assert_eq!(config.excluded_names, vec!["desktop.ini", "Thumbs.db"]);
}

#[test]
fn test_dependency_record_sets_have_no_duplicates() {
    let mut imports = BTreeSet::new();
    imports.insert("os".to_string());
    imports.insert("os".to_string());
    imports.insert("json".to_string());

    let record = DependencyRecord::new("/src/app.py", imports, BTreeSet::new());
    assert_eq!(record.imports.len(), 2);
    assert_eq!(record.imports_display(), "json, os");
}

#[test]
fn test_warning_constructors() {
    let warning = ScanWarning::read_error("/locked", "permission denied");
    assert_eq!(warning.kind, WarningKind::ReadError);
    assert!(warning.message.contains("permission denied"));

    let custom = ScanWarning::new("/x", "odd entry", WarningKind::MetadataError);
    assert_eq!(custom.path, PathBuf::from("/x"));
}

#[test]
fn test_parse_error_fields() {
    let err = ParseError::new(1, 5, "invalid syntax");
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 5);
    assert!(err.to_string().contains("line 1"));
}
