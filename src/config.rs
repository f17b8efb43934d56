//! Configuration for DuoKV
//!
//! Centralized configuration with sensible defaults.

use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Main configuration for a store instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Command Log Location
    // -------------------------------------------------------------------------
    /// Base directory the log location is resolved against.
    /// Internal structure:
    ///   {root_dir}/
    ///     └── {dir_path}/
    ///         └── {dir_name}/
    ///             └── {log_file_name}   (command log)
    pub root_dir: PathBuf,

    /// Directory path below `root_dir`; must be relative and non-empty
    pub dir_path: String,

    /// Name of the directory holding the log file
    pub dir_name: String,

    /// File name of the command log
    pub log_file_name: String,

    // -------------------------------------------------------------------------
    // Command Log Behavior
    // -------------------------------------------------------------------------
    /// Whether mutations are written through to the command log
    pub logging_enabled: bool,

    /// How hard each append pushes data towards the disk
    pub sync_strategy: SyncStrategy,
}

/// Command log sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// Flush userspace buffers after every line (visible to readers promptly)
    Flush,

    /// Flush and fsync after every line (safest, slowest)
    EveryWrite,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: std::env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            dir_path: "Desktop".to_string(),
            dir_name: "DUOKV_PERSISTOR".to_string(),
            log_file_name: "snapshot".to_string(),
            logging_enabled: false,
            sync_strategy: SyncStrategy::Flush,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Directory holding the command log: `{root_dir}/{dir_path}/{dir_name}`
    pub fn log_dir(&self) -> PathBuf {
        self.root_dir.join(&self.dir_path).join(&self.dir_name)
    }

    /// Full path of the command log file
    pub fn log_path(&self) -> PathBuf {
        self.log_dir().join(&self.log_file_name)
    }

    /// Check the fields that can be rejected
    pub fn validate(&self) -> Result<()> {
        validate_dir_path(&self.dir_path)?;
        if self.log_file_name.is_empty() {
            return Err(StoreError::Config("log file name is empty".to_string()));
        }
        Ok(())
    }
}

/// A directory path must be non-empty and relative to the root directory.
pub(crate) fn validate_dir_path(dir_path: &str) -> Result<()> {
    if dir_path.is_empty() {
        return Err(StoreError::Config("dirpath is empty".to_string()));
    }
    if dir_path.starts_with('/') || Path::new(dir_path).is_absolute() {
        return Err(StoreError::Config(format!(
            "dirpath must be relative: {}",
            dir_path
        )));
    }
    Ok(())
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the root directory the log location is resolved against
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.root_dir = path.into();
        self
    }

    /// Set the relative directory path below the root
    pub fn dir_path(mut self, path: impl Into<String>) -> Self {
        self.config.dir_path = path.into();
        self
    }

    /// Set the name of the log directory
    pub fn dir_name(mut self, name: impl Into<String>) -> Self {
        self.config.dir_name = name.into();
        self
    }

    /// Set the log file name
    pub fn log_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.log_file_name = name.into();
        self
    }

    /// Enable or disable write-through logging
    pub fn logging(mut self, enabled: bool) -> Self {
        self.config.logging_enabled = enabled;
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
