//! Tests for SharedStore
//!
//! These tests verify:
//! - Operations through the shared handle
//! - Concurrent writers keep one log line per mutation
//! - Multi-step sequences under a single lock

use std::fs;
use std::thread;

use duokv::{Config, SharedStore, Store, StoreError};
use tempfile::TempDir;

fn s(text: &str) -> String {
    text.to_string()
}

fn setup_shared_store(logging: bool) -> (TempDir, SharedStore<String, String>) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .root_dir(temp_dir.path())
        .dir_path("shared")
        .logging(logging)
        .build();
    let store = Store::with_config(config).unwrap();
    (temp_dir, SharedStore::new(store))
}

#[test]
fn test_shared_basic_operations() {
    let (_temp, store) = setup_shared_store(false);

    store.set(s("k"), s("1")).unwrap();
    assert_eq!(store.incr(&s("k")).unwrap(), "2");
    assert!(store.exists(&s("k")));

    store.rpush(s("q"), s("a")).unwrap();
    assert_eq!(store.llen(&s("q")).unwrap(), 1);
    assert_eq!(store.rpop(&s("q")).unwrap(), "a");
    assert!(matches!(store.rpop(&s("q")), Err(StoreError::EmptyList(_))));

    store.clear_all().unwrap();
    assert_eq!(store.size(), 0);
    assert_eq!(store.size_list(), 0);
}

#[test]
fn test_clones_share_state() {
    let (_temp, store) = setup_shared_store(false);
    let other = store.clone();

    store.set(s("k"), s("v")).unwrap();

    assert_eq!(other.get(&s("k")).unwrap(), (s("k"), s("v")));
}

#[test]
fn test_concurrent_counter() {
    let (_temp, store) = setup_shared_store(false);
    store.set(s("counter"), s("0")).unwrap();

    let mut handles = vec![];
    for _ in 0..8 {
        let store = store.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..100 {
                store.incr(&s("counter")).unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.get(&s("counter")).unwrap().1, "800");
}

#[test]
fn test_concurrent_writers_log_every_mutation() {
    let (_temp, store) = setup_shared_store(true);

    let mut handles = vec![];
    for t in 0..4 {
        let store = store.clone();
        handles.push(thread::spawn(move || {
            for i in 0..50 {
                store.rpush(format!("list{}", t), format!("{}", i)).unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let contents = fs::read_to_string(store.log_path()).unwrap();
    assert_eq!(contents.lines().count(), 200);

    // Per-list order in the log matches push order
    for t in 0..4 {
        let prefix = format!("RPUSH list{} ", t);
        let values: Vec<usize> = contents
            .lines()
            .filter_map(|line| line.strip_prefix(prefix.as_str()))
            .map(|v| v.parse().unwrap())
            .collect();
        assert_eq!(values, (0..50).collect::<Vec<usize>>());
    }
}

#[test]
fn test_with_runs_under_one_lock() {
    let (_temp, store) = setup_shared_store(false);
    store.rpush(s("jobs"), s("a")).unwrap();
    store.rpush(s("jobs"), s("b")).unwrap();

    let drained = store.with(|inner| {
        let mut out = Vec::new();
        while let Ok(job) = inner.lpop(&s("jobs")) {
            out.push(job);
        }
        out
    });

    assert_eq!(drained, vec![s("a"), s("b")]);
    assert!(store.lexists(&s("jobs")));
}

#[test]
fn test_shared_logging_toggle() {
    let (_temp, store) = setup_shared_store(false);

    assert!(!store.is_logging());
    store.set_logging(true);
    store.set(s("a"), s("1")).unwrap();

    let contents = fs::read_to_string(store.log_path()).unwrap();
    assert_eq!(contents, "SET a 1\n");
}
