//! Store Module
//!
//! The in-process key-value store: two independent namespaces plus an
//! optional write-through command log.
//!
//! ## Responsibilities
//! - Scalar namespace: `K -> V`
//! - List namespace: `K -> VecDeque<V>`, push/pop at both ends
//! - Integer coercion for `incr`/`decr`
//! - One log line per successful mutation while logging is enabled

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::hash::Hash;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::{validate_dir_path, Config};
use crate::error::{Namespace, Result, StoreError};
use crate::persistor::CommandLog;
use crate::protocol::{encode_command, Command, Reply};
use crate::value::{self, StoreValue};

/// Outcome of replaying a command stream
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplayResult {
    /// Mutating commands applied to the store
    pub commands_applied: u64,

    /// Mutating commands the store refused (e.g. `SETNX` on a present key)
    pub commands_rejected: u64,

    /// Read commands found in the stream and ignored
    pub commands_ignored: u64,
}

/// The key-value store
///
/// ## Logging Model
///
/// Each mutation is applied in memory first, then its command line is
/// appended to the log. When the append fails the mutation stays applied
/// and the call returns [`StoreError::LoggingFailure`]
/// (see [`StoreError::is_committed`]). Clearing always happens; only the
/// log append of a clear can fail.
///
/// ## Concurrency
///
/// Single owner, `&mut self` for every mutation. Wrap in
/// [`SharedStore`](crate::SharedStore) to share between threads.
pub struct Store<K, V> {
    /// Store configuration (kept in sync with runtime log relocation)
    config: Config,

    /// Scalar namespace
    scalars: HashMap<K, V>,

    /// List namespace, disjoint from `scalars`
    lists: HashMap<K, VecDeque<V>>,

    /// Command log sink, opened on first use and closed on drop
    log: CommandLog,

    /// Whether mutations are written through to `log`
    logging: bool,
}

impl<K, V> Store<K, V>
where
    K: Eq + Hash + Clone + fmt::Display,
    V: StoreValue,
{
    /// Create an empty store with the default configuration
    pub fn new() -> Self {
        let config = Config::default();
        Self::from_valid_config(config)
    }

    /// Create an empty store with the given configuration
    ///
    /// Does not touch the filesystem; the log opens on first append.
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: Config) -> Self {
        let log = CommandLog::new(&config);
        let logging = config.logging_enabled;
        Self {
            config,
            scalars: HashMap::new(),
            lists: HashMap::new(),
            log,
            logging,
        }
    }

    // =========================================================================
    // Scalar namespace
    // =========================================================================

    /// Insert or overwrite a scalar entry
    pub fn set(&mut self, key: K, value: V) -> Result<()> {
        let line = self.render(|| Command::Set { key: &key, value: &value });
        self.scalars.insert(key, value);
        self.commit(line)
    }

    /// Insert a scalar entry only if the key is absent
    pub fn setnx(&mut self, key: K, value: V) -> Result<()> {
        if self.scalars.contains_key(&key) {
            return Err(StoreError::Conflict(key.to_string()));
        }
        let line = self.render(|| Command::SetNx { key: &key, value: &value });
        self.scalars.insert(key, value);
        self.commit(line)
    }

    /// Replace the value of an existing scalar entry
    pub fn update(&mut self, key: &K, value: V) -> Result<()> {
        if !self.scalars.contains_key(key) {
            return Err(StoreError::NotFound(key.to_string()));
        }
        let line = self.render(|| Command::Update { key, value: &value });
        self.scalars.insert(key.clone(), value);
        self.commit(line)
    }

    /// Get a scalar entry as `(key, value)`
    pub fn get(&self, key: &K) -> Result<(K, V)> {
        self.scalars
            .get_key_value(key)
            .map(|(k, v)| (k.clone(), v.clone()))
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    /// Whether the scalar namespace holds `key`
    pub fn exists(&self, key: &K) -> bool {
        self.scalars.contains_key(key)
    }

    /// Remove a scalar entry
    pub fn del(&mut self, key: &K) -> Result<()> {
        if self.scalars.remove(key).is_none() {
            return Err(StoreError::NotFound(key.to_string()));
        }
        let line = self.render(|| Command::Del { key });
        self.commit(line)
    }

    /// Add one to a scalar value, returning the new value
    pub fn incr(&mut self, key: &K) -> Result<V> {
        self.step(key, 1)
    }

    /// Subtract one from a scalar value, returning the new value
    pub fn decr(&mut self, key: &K) -> Result<V> {
        self.step(key, -1)
    }

    fn step(&mut self, key: &K, delta: i64) -> Result<V> {
        let current = self
            .scalars
            .get_mut(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        let next = value::offset(key, current, delta)?;
        *current = next.clone();

        let line = self.render(|| {
            if delta > 0 {
                Command::Incr { key }
            } else {
                Command::Decr { key }
            }
        });
        self.commit(line)?;
        Ok(next)
    }

    /// All scalar keys, unordered. An empty namespace is an error.
    pub fn get_keys(&self) -> Result<Vec<K>> {
        if self.scalars.is_empty() {
            return Err(StoreError::EmptyNamespace(Namespace::Scalar));
        }
        Ok(self.scalars.keys().cloned().collect())
    }

    // =========================================================================
    // List namespace
    // =========================================================================

    /// Push to the front of a list, creating it if absent
    pub fn lpush(&mut self, key: K, value: V) -> Result<()> {
        let line = self.render(|| Command::LPush { key: &key, value: &value });
        self.lists.entry(key).or_default().push_front(value);
        self.commit(line)
    }

    /// Push to the back of a list, creating it if absent
    pub fn rpush(&mut self, key: K, value: V) -> Result<()> {
        let line = self.render(|| Command::RPush { key: &key, value: &value });
        self.lists.entry(key).or_default().push_back(value);
        self.commit(line)
    }

    /// Pop from the front of a list
    ///
    /// The list stays present (possibly empty) after the pop. If the log
    /// append fails the element has already been removed and the call
    /// returns `LoggingFailure` without the value, so it is lost.
    pub fn lpop(&mut self, key: &K) -> Result<V> {
        let value = self.list_mut(key)?.pop_front();
        let value = value.ok_or_else(|| StoreError::EmptyList(key.to_string()))?;
        let line = self.render(|| Command::LPop { key, value: Some(&value) });
        self.commit(line)?;
        Ok(value)
    }

    /// Pop from the back of a list
    ///
    /// The list stays present (possibly empty) after the pop. If the log
    /// append fails the element has already been removed and the call
    /// returns `LoggingFailure` without the value, so it is lost.
    pub fn rpop(&mut self, key: &K) -> Result<V> {
        let value = self.list_mut(key)?.pop_back();
        let value = value.ok_or_else(|| StoreError::EmptyList(key.to_string()))?;
        let line = self.render(|| Command::RPop { key, value: Some(&value) });
        self.commit(line)?;
        Ok(value)
    }

    fn list_mut(&mut self, key: &K) -> Result<&mut VecDeque<V>> {
        if self.lists.is_empty() {
            return Err(StoreError::EmptyNamespace(Namespace::List));
        }
        self.lists
            .get_mut(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    /// Whether the list namespace holds `key`
    pub fn lexists(&self, key: &K) -> bool {
        self.lists.contains_key(key)
    }

    /// Number of elements in one list
    pub fn llen(&self, key: &K) -> Result<usize> {
        self.lists
            .get(key)
            .map(VecDeque::len)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    /// All list keys, unordered. An empty namespace is an error.
    pub fn get_lkeys(&self) -> Result<Vec<K>> {
        if self.lists.is_empty() {
            return Err(StoreError::EmptyNamespace(Namespace::List));
        }
        Ok(self.lists.keys().cloned().collect())
    }

    // =========================================================================
    // Clearing and sizes
    // =========================================================================

    /// Drop every scalar entry; lists are untouched
    pub fn clear(&mut self) -> Result<()> {
        self.scalars.clear();
        let line = self.render(|| Command::Clear);
        self.commit(line)
    }

    /// Drop every list; scalars are untouched
    pub fn clear_list(&mut self) -> Result<()> {
        self.lists.clear();
        let line = self.render(|| Command::ClearList);
        self.commit(line)
    }

    /// Drop both namespaces
    pub fn clear_all(&mut self) -> Result<()> {
        self.scalars.clear();
        self.lists.clear();
        let line = self.render(|| Command::ClearAll);
        self.commit(line)
    }

    /// Number of scalar entries
    pub fn size(&self) -> usize {
        self.scalars.len()
    }

    /// Number of lists
    pub fn size_list(&self) -> usize {
        self.lists.len()
    }

    // =========================================================================
    // Command execution
    // =========================================================================

    /// Execute a command
    ///
    /// Routes commands to the matching operation. `LPOP`/`RPOP` ignore any
    /// value they carry.
    pub fn execute(&mut self, command: Command<K, V>) -> Result<Reply<K, V>> {
        match command {
            Command::Set { key, value } => self.set(key, value).map(|_| Reply::Ok),
            Command::SetNx { key, value } => self.setnx(key, value).map(|_| Reply::Ok),
            Command::Update { key, value } => self.update(&key, value).map(|_| Reply::Ok),
            Command::Del { key } => self.del(&key).map(|_| Reply::Ok),
            Command::Incr { key } => self.incr(&key).map(Reply::Value),
            Command::Decr { key } => self.decr(&key).map(Reply::Value),
            Command::LPush { key, value } => self.lpush(key, value).map(|_| Reply::Ok),
            Command::RPush { key, value } => self.rpush(key, value).map(|_| Reply::Ok),
            Command::LPop { key, .. } => self.lpop(&key).map(Reply::Value),
            Command::RPop { key, .. } => self.rpop(&key).map(Reply::Value),
            Command::Clear => self.clear().map(|_| Reply::Ok),
            Command::ClearList => self.clear_list().map(|_| Reply::Ok),
            Command::ClearAll => self.clear_all().map(|_| Reply::Ok),
            Command::Get { key } => self.get(&key).map(|(k, v)| Reply::Entry(k, v)),
            Command::Exists { key } => Ok(Reply::Bool(self.exists(&key))),
            Command::LExists { key } => Ok(Reply::Bool(self.lexists(&key))),
            Command::LLen { key } => self.llen(&key).map(Reply::Count),
            Command::Keys => self.get_keys().map(Reply::Keys),
            Command::LKeys => self.get_lkeys().map(Reply::Keys),
            Command::Size => Ok(Reply::Count(self.size())),
            Command::LSize => Ok(Reply::Count(self.size_list())),
        }
    }

    /// Apply a stream of commands without logging them.
    ///
    /// Commands the store refuses are counted and skipped; a stream error
    /// (e.g. a corrupt log line) stops the replay. The logging flag is
    /// restored on every path.
    pub fn replay<I>(&mut self, commands: I) -> Result<ReplayResult>
    where
        I: IntoIterator<Item = Result<Command<K, V>>>,
    {
        let was_logging = std::mem::replace(&mut self.logging, false);
        let result = self.replay_inner(commands);
        self.logging = was_logging;

        if let Ok(stats) = &result {
            info!(
                applied = stats.commands_applied,
                rejected = stats.commands_rejected,
                ignored = stats.commands_ignored,
                "replay finished"
            );
        }
        result
    }

    fn replay_inner<I>(&mut self, commands: I) -> Result<ReplayResult>
    where
        I: IntoIterator<Item = Result<Command<K, V>>>,
    {
        let mut stats = ReplayResult::default();
        for command in commands {
            let command = command?;
            if !command.is_mutating() {
                stats.commands_ignored += 1;
                continue;
            }
            let name = command.name();
            match self.execute(command) {
                Ok(_) => stats.commands_applied += 1,
                Err(e) => {
                    debug!(command = name, error = %e, "replayed command rejected");
                    stats.commands_rejected += 1;
                }
            }
        }
        Ok(stats)
    }

    // =========================================================================
    // Command log control
    // =========================================================================

    /// Turn write-through logging on or off
    pub fn set_logging(&mut self, enabled: bool) {
        if self.logging != enabled {
            debug!(enabled, "command logging toggled");
        }
        self.logging = enabled;
    }

    pub fn is_logging(&self) -> bool {
        self.logging
    }

    /// Move the log under a new relative directory path and reopen it.
    ///
    /// Empty or absolute paths are rejected and change nothing.
    pub fn change_log_dirpath(&mut self, dir_path: &str) -> Result<()> {
        validate_dir_path(dir_path)?;
        self.config.dir_path = dir_path.to_string();
        info!(dir_path, "relocating command log");
        self.log.set_dir_path(dir_path)
    }

    /// Rename the log directory and reopen the log there
    pub fn change_log_dirname(&mut self, dir_name: &str) -> Result<()> {
        self.config.dir_name = dir_name.to_string();
        info!(dir_name, "relocating command log");
        self.log.set_dir_name(dir_name)
    }

    /// Directory holding the log: `{root}/{dir_path}/{dir_name}`
    pub fn log_dir(&self) -> PathBuf {
        self.log.dir()
    }

    /// Full path of the log file
    pub fn log_path(&self) -> PathBuf {
        self.log.path()
    }

    /// The underlying log sink
    pub fn command_log(&self) -> &CommandLog {
        &self.log
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Render the log line for a mutation, or `None` when logging is off
    fn render<'a, F>(&self, build: F) -> Option<String>
    where
        F: FnOnce() -> Command<&'a K, &'a V>,
        K: 'a,
        V: 'a,
    {
        self.logging.then(|| encode_command(&build()))
    }

    /// Append a rendered line; the in-memory change is already applied
    fn commit(&mut self, line: Option<String>) -> Result<()> {
        let Some(line) = line else {
            return Ok(());
        };
        self.log.append(&line).map_err(|e| {
            warn!(command = %line, "mutation applied but not logged");
            e
        })
    }
}

impl<K, V> Default for Store<K, V>
where
    K: Eq + Hash + Clone + fmt::Display,
    V: StoreValue,
{
    fn default() -> Self {
        Self::new()
    }
}
