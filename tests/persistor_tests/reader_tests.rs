//! Tests for CommandLogReader
//!
//! These tests verify:
//! - Reading back lines written by the store
//! - Blank line handling
//! - Corrupt line detection with line numbers

use std::fs;

use duokv::persistor::CommandLogReader;
use duokv::{Command, Config, Store, StoreError};
use tempfile::TempDir;

fn s(text: &str) -> String {
    text.to_string()
}

// =============================================================================
// Reading Tests
// =============================================================================

#[test]
fn test_read_back_store_log() {
    let temp = TempDir::new().unwrap();
    let config = Config::builder()
        .root_dir(temp.path())
        .dir_path("data")
        .logging(true)
        .build();
    let mut store: Store<String, String> = Store::with_config(config).unwrap();

    store.set(s("greeting"), s("hello world")).unwrap();
    store.rpush(s("q"), s("a")).unwrap();
    store.lpop(&s("q")).unwrap();
    store.clear_all().unwrap();

    let commands = CommandLogReader::open(&store.log_path())
        .unwrap()
        .read_all()
        .unwrap();

    assert_eq!(
        commands,
        vec![
            Command::Set { key: s("greeting"), value: s("hello world") },
            Command::RPush { key: s("q"), value: s("a") },
            Command::LPop { key: s("q"), value: Some(s("a")) },
            Command::ClearAll,
        ]
    );
}

#[test]
fn test_skips_blank_lines() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("log");
    fs::write(&path, "SET a 1\n\n   \nDEL a\n").unwrap();

    let mut reader = CommandLogReader::open(&path).unwrap();

    assert_eq!(
        reader.next_command().unwrap(),
        Some(Command::Set { key: s("a"), value: s("1") })
    );
    assert_eq!(reader.next_command().unwrap(), Some(Command::Del { key: s("a") }));
    assert_eq!(reader.next_command().unwrap(), None);
    assert_eq!(reader.line_no(), 4);
}

#[test]
fn test_iterator() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("log");
    fs::write(&path, "INCR n\nDECR n\nCLEAR\n").unwrap();

    let names: Vec<&str> = CommandLogReader::open(&path)
        .unwrap()
        .map(|c| c.unwrap().name())
        .collect();

    assert_eq!(names, vec!["INCR", "DECR", "CLEAR"]);
}

#[test]
fn test_corrupt_line_reports_line_number() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("log");
    fs::write(&path, "SET a 1\nBOGUS a\nSET b 2\n").unwrap();

    let mut reader = CommandLogReader::open(&path).unwrap();
    reader.next_command().unwrap();

    match reader.next_command() {
        Err(StoreError::CorruptLog { line, reason }) => {
            assert_eq!(line, 2);
            assert!(reason.contains("BOGUS"));
        }
        other => panic!("expected corrupt log error, got {other:?}"),
    }
}

#[test]
fn test_missing_file() {
    let temp = TempDir::new().unwrap();

    let result = CommandLogReader::open(&temp.path().join("absent"));

    assert!(matches!(result, Err(StoreError::Io(_))));
}
