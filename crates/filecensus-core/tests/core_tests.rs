use std::path::{Path, PathBuf};

use filecensus_core::{
    Category, CategoryTotals, DEFAULT_THRESHOLD, ScanConfig, ScanError, format_size, normalize,
};
use tempfile::TempDir;

#[test]
fn test_category_display_matches_identifier() {
    assert_eq!(Category::DIRECTORIES.to_string(), "directories");
    assert_eq!(Category::SYMLINK.to_string(), "symlink");
    assert_eq!(Category::from_mime("image/png").to_string(), "image");
}

#[test]
fn test_totals_insertion_order_survives_updates() {
    let mut totals = CategoryTotals::new();
    totals.record(Category::DIRECTORIES, 4096);
    totals.record(Category::TEXT, 1);
    totals.record(Category::UNKNOWN, 7);
    // Updating an existing key must not move it.
    totals.record(Category::TEXT, 1);

    let order: Vec<_> = totals.iter().map(|(c, _)| c.to_string()).collect();
    assert_eq!(order, vec!["directories", "text", "unknown"]);
    assert_eq!(totals.get(&Category::TEXT), 2);
    assert_eq!(totals.len(), 3);
}

#[test]
fn test_config_defaults_and_summary_format_line() {
    let config = ScanConfig::new("/srv/data");
    assert_eq!(config.threshold, DEFAULT_THRESHOLD);

    let line = format!("{}: {}.", Category::TEXT, format_size(4));
    assert_eq!(line, "text: 4.0 B.");
}

#[test]
fn test_normalize_resolves_symlinked_directories() {
    let temp = TempDir::new().unwrap();
    let real = temp.path().join("real");
    std::fs::create_dir(&real).unwrap();

    #[cfg(unix)]
    {
        let link = temp.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let via_link = normalize(&link, None);
        let direct = normalize(&real, None);
        assert_eq!(via_link, direct);
    }
}

#[test]
fn test_normalize_missing_path_is_stable() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope").join("..").join("file.txt");

    let once = normalize(&missing, None);
    let twice = normalize(&once, None);
    assert_eq!(once, twice);
    assert!(once.is_absolute());
    assert!(once.ends_with("file.txt"));
}

#[test]
fn test_normalize_relative_against_parent() {
    let resolved = normalize(Path::new("notes/todo.txt"), Some(Path::new("/home/user")));
    assert_eq!(resolved, PathBuf::from("/home/user/notes/todo.txt"));
}

#[test]
fn test_scan_error_reason_feeds_skip_lines() {
    let err = ScanError::io(
        "/data/gone",
        std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    );
    let line = format!("Error: {}: {}. Skipping.", err.path().display(), err.reason());
    assert_eq!(line, "Error: /data/gone: no such file or directory. Skipping.");
}
