//! Shared store handle
//!
//! Thread-safe wrapper around [`Store`].
//!
//! One `parking_lot::Mutex` guards the whole store, so the namespace
//! mutation and its log append happen inside the same critical section and
//! log lines always come out in mutation order.

use std::fmt;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::protocol::{Command, Reply};
use crate::store::Store;
use crate::value::StoreValue;

/// Cloneable, lock-guarded handle to a [`Store`]
pub struct SharedStore<K, V> {
    inner: Arc<Mutex<Store<K, V>>>,
}

impl<K, V> Clone for SharedStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedStore<K, V>
where
    K: Eq + Hash + Clone + fmt::Display,
    V: StoreValue,
{
    pub fn new(store: Store<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access, for multi-step sequences that must
    /// not interleave with other callers
    pub fn with<R>(&self, f: impl FnOnce(&mut Store<K, V>) -> R) -> R {
        let mut store = self.inner.lock();
        f(&mut store)
    }

    pub fn execute(&self, command: Command<K, V>) -> Result<Reply<K, V>> {
        self.inner.lock().execute(command)
    }

    // -------------------------------------------------------------------------
    // Scalar namespace
    // -------------------------------------------------------------------------

    pub fn set(&self, key: K, value: V) -> Result<()> {
        self.inner.lock().set(key, value)
    }

    pub fn setnx(&self, key: K, value: V) -> Result<()> {
        self.inner.lock().setnx(key, value)
    }

    pub fn update(&self, key: &K, value: V) -> Result<()> {
        self.inner.lock().update(key, value)
    }

    pub fn get(&self, key: &K) -> Result<(K, V)> {
        self.inner.lock().get(key)
    }

    pub fn exists(&self, key: &K) -> bool {
        self.inner.lock().exists(key)
    }

    pub fn del(&self, key: &K) -> Result<()> {
        self.inner.lock().del(key)
    }

    pub fn incr(&self, key: &K) -> Result<V> {
        self.inner.lock().incr(key)
    }

    pub fn decr(&self, key: &K) -> Result<V> {
        self.inner.lock().decr(key)
    }

    pub fn get_keys(&self) -> Result<Vec<K>> {
        self.inner.lock().get_keys()
    }

    // -------------------------------------------------------------------------
    // List namespace
    // -------------------------------------------------------------------------

    pub fn lpush(&self, key: K, value: V) -> Result<()> {
        self.inner.lock().lpush(key, value)
    }

    pub fn rpush(&self, key: K, value: V) -> Result<()> {
        self.inner.lock().rpush(key, value)
    }

    pub fn lpop(&self, key: &K) -> Result<V> {
        self.inner.lock().lpop(key)
    }

    pub fn rpop(&self, key: &K) -> Result<V> {
        self.inner.lock().rpop(key)
    }

    pub fn lexists(&self, key: &K) -> bool {
        self.inner.lock().lexists(key)
    }

    pub fn llen(&self, key: &K) -> Result<usize> {
        self.inner.lock().llen(key)
    }

    pub fn get_lkeys(&self) -> Result<Vec<K>> {
        self.inner.lock().get_lkeys()
    }

    // -------------------------------------------------------------------------
    // Clearing, sizes, log control
    // -------------------------------------------------------------------------

    pub fn clear(&self) -> Result<()> {
        self.inner.lock().clear()
    }

    pub fn clear_list(&self) -> Result<()> {
        self.inner.lock().clear_list()
    }

    pub fn clear_all(&self) -> Result<()> {
        self.inner.lock().clear_all()
    }

    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    pub fn size_list(&self) -> usize {
        self.inner.lock().size_list()
    }

    pub fn set_logging(&self, enabled: bool) {
        self.inner.lock().set_logging(enabled)
    }

    pub fn is_logging(&self) -> bool {
        self.inner.lock().is_logging()
    }

    pub fn change_log_dirpath(&self, dir_path: &str) -> Result<()> {
        self.inner.lock().change_log_dirpath(dir_path)
    }

    pub fn change_log_dirname(&self, dir_name: &str) -> Result<()> {
        self.inner.lock().change_log_dirname(dir_name)
    }

    pub fn log_path(&self) -> PathBuf {
        self.inner.lock().log_path()
    }
}

impl<K, V> From<Store<K, V>> for SharedStore<K, V>
where
    K: Eq + Hash + Clone + fmt::Display,
    V: StoreValue,
{
    fn from(store: Store<K, V>) -> Self {
        Self::new(store)
    }
}
