//! File loading integration tests
//!
//! Tests for reading detection logs from disk, including the error paths
//! reported to the user.

#[path = "../common/mod.rs"]
mod common;

use common::assertions::*;
use common::example_files::*;
use common::synthetic::*;
use skysense::parsers::types::ParseError;
use skysense::parsers::SkySense;
use std::io::Write;
use std::path::Path;

#[test]
fn test_load_fixture_from_disk() {
    let log = SkySense
        .load(Path::new(DETECTION_SMALL))
        .expect("Should load fixture");

    assert_eq!(log.len(), 6);
    assert_aligned_series(&log);
    assert_monotonic_times(&log);
}

#[test]
fn test_missing_file_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does_not_exist.txt");

    match SkySense.load(&path) {
        Err(ParseError::FileNotFound { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected FileNotFound, got {:?}", other),
    }
}

#[test]
fn test_empty_file_reported() {
    let file = tempfile::NamedTempFile::new().unwrap();
    assert!(matches!(
        SkySense.load(file.path()),
        Err(ParseError::EmptyInput)
    ));
}

#[test]
fn test_malformed_file_names_line() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{}", rising_log(3)).unwrap();
    writeln!(file, "1600000003 1 2 3").unwrap();
    file.flush().unwrap();

    let err = SkySense.load(file.path()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Line 4"), "unexpected message: {}", message);
    assert!(message.contains("1600000003 1 2 3"));
}

#[test]
fn test_large_file_loads() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", rising_log(20_000)).unwrap();
    file.flush().unwrap();

    let log = SkySense.load(file.path()).unwrap();
    assert_eq!(log.len(), 20_000);
    assert_eq!(log.last_timestamp() - log.first_timestamp(), 19_999);
}
