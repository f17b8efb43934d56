//! Tests for CommandLog
//!
//! These tests verify:
//! - Lazy open and directory creation
//! - Append-and-flush visibility
//! - Sync strategies
//! - Reconfiguration and validation
//! - Close on drop

use std::fs;
use std::path::{Path, PathBuf};

use duokv::persistor::CommandLog;
use duokv::{Config, StoreError, SyncStrategy};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_log(sync_strategy: SyncStrategy) -> (TempDir, CommandLog) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .root_dir(temp_dir.path())
        .dir_path("logs")
        .dir_name("cmd")
        .log_file_name("commands.log")
        .sync_strategy(sync_strategy)
        .build();
    let log = CommandLog::new(&config);
    (temp_dir, log)
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

// =============================================================================
// Basic Writing Tests
// =============================================================================

#[test]
fn test_new_log_is_closed() {
    let (temp, log) = setup_temp_log(SyncStrategy::Flush);

    assert!(!log.is_open());
    assert_eq!(log.lines_written(), 0);
    assert!(!temp.path().join("logs").exists());
}

#[test]
fn test_paths() {
    let (temp, log) = setup_temp_log(SyncStrategy::Flush);

    assert_eq!(log.dir(), temp.path().join("logs").join("cmd"));
    assert_eq!(log.path(), temp.path().join("logs/cmd/commands.log"));
}

#[test]
fn test_first_append_creates_file() {
    let (_temp, mut log) = setup_temp_log(SyncStrategy::Flush);

    log.append("SET a 1").unwrap();

    assert!(log.is_open());
    assert!(log.path().is_file());
    assert_eq!(read_lines(&log.path()), vec!["SET a 1"]);
}

#[test]
fn test_append_is_visible_immediately() {
    let (_temp, mut log) = setup_temp_log(SyncStrategy::Flush);

    for i in 0..10 {
        log.append(&format!("INCR counter{}", i)).unwrap();
        // Flushed before append returns; no drop needed
        assert_eq!(read_lines(&log.path()).len(), i + 1);
    }
    assert_eq!(log.lines_written(), 10);
}

#[test]
fn test_every_write_sync() {
    let (_temp, mut log) = setup_temp_log(SyncStrategy::EveryWrite);

    log.append("SET a 1").unwrap();
    log.append("DEL a").unwrap();

    assert_eq!(read_lines(&log.path()), vec!["SET a 1", "DEL a"]);
}

#[test]
fn test_append_preserves_existing_content() {
    let (_temp, mut log) = setup_temp_log(SyncStrategy::Flush);
    fs::create_dir_all(log.dir()).unwrap();
    fs::write(log.path(), "SET old 1\n").unwrap();

    log.append("SET new 2").unwrap();

    assert_eq!(read_lines(&log.path()), vec!["SET old 1", "SET new 2"]);
}

#[test]
fn test_drop_closes_and_keeps_data() {
    let (_temp, mut log) = setup_temp_log(SyncStrategy::Flush);
    log.append("CLEARALL").unwrap();
    let path = log.path();

    drop(log);

    assert_eq!(read_lines(&path), vec!["CLEARALL"]);
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_configure_opens_new_location() {
    let (temp, mut log) = setup_temp_log(SyncStrategy::Flush);

    log.configure("other", "dir").unwrap();

    assert!(log.is_open());
    assert_eq!(log.dir(), temp.path().join("other").join("dir"));
    assert!(log.path().exists());
}

#[test]
fn test_configure_moves_subsequent_lines() {
    let (_temp, mut log) = setup_temp_log(SyncStrategy::Flush);
    log.append("SET a 1").unwrap();
    let first: PathBuf = log.path();

    log.set_dir_name("second").unwrap();
    log.append("SET b 2").unwrap();

    assert_ne!(first, log.path());
    assert_eq!(read_lines(&first), vec!["SET a 1"]);
    assert_eq!(read_lines(&log.path()), vec!["SET b 2"]);
}

#[test]
fn test_set_dir_path_keeps_dir_name() {
    let (temp, mut log) = setup_temp_log(SyncStrategy::Flush);

    log.set_dir_path("moved").unwrap();

    assert_eq!(log.dir(), temp.path().join("moved").join("cmd"));
}

#[test]
fn test_configure_rejects_empty_path() {
    let (_temp, mut log) = setup_temp_log(SyncStrategy::Flush);
    let before = log.path();

    assert!(matches!(log.configure("", "x"), Err(StoreError::Config(_))));
    assert_eq!(log.path(), before);
    assert!(!log.is_open());
}

#[test]
fn test_configure_rejects_absolute_path() {
    let (_temp, mut log) = setup_temp_log(SyncStrategy::Flush);
    let before = log.path();

    assert!(matches!(log.set_dir_path("/var/log"), Err(StoreError::Config(_))));
    assert_eq!(log.path(), before);
}

// =============================================================================
// Failure Tests
// =============================================================================

#[test]
fn test_unwritable_location_reports_logging_failure() {
    let (temp, mut log) = setup_temp_log(SyncStrategy::Flush);
    fs::write(temp.path().join("file"), b"x").unwrap();

    let err = log.configure("file", "cmd").unwrap_err();
    assert!(matches!(err, StoreError::LoggingFailure { .. }));
    assert!(!log.is_open());

    let err = log.append("SET a 1").unwrap_err();
    match err {
        StoreError::LoggingFailure { path, .. } => {
            assert!(path.starts_with(temp.path().join("file")));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(log.lines_written(), 0);
}
