//! Command Log Writer
//!
//! Handles appending command lines to the log file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use tracing::{debug, trace, warn};

use crate::config::{validate_dir_path, Config, SyncStrategy};
use crate::error::{Result, StoreError};

/// Append-only sink for command lines
///
/// The file handle lives in `writer`; `None` means the sink is closed and the
/// next append (or reconfiguration) will try to open it.
pub struct CommandLog {
    root_dir: PathBuf,
    dir_path: String,
    dir_name: String,
    file_name: String,
    sync_strategy: SyncStrategy,

    writer: Option<BufWriter<File>>,

    /// Lines successfully appended by this handle
    lines_written: u64,
}

impl CommandLog {
    /// Create a closed log for the location described by `config`
    pub fn new(config: &Config) -> Self {
        Self {
            root_dir: config.root_dir.clone(),
            dir_path: config.dir_path.clone(),
            dir_name: config.dir_name.clone(),
            file_name: config.log_file_name.clone(),
            sync_strategy: config.sync_strategy,
            writer: None,
            lines_written: 0,
        }
    }

    /// Move the log to `{root}/{dir_path}/{dir_name}` and reopen it there.
    ///
    /// An invalid `dir_path` leaves the current location untouched.
    pub fn configure(&mut self, dir_path: &str, dir_name: &str) -> Result<()> {
        validate_dir_path(dir_path)?;
        self.dir_path = dir_path.to_string();
        self.dir_name = dir_name.to_string();
        self.reopen()
    }

    /// Change only the relative directory path
    pub fn set_dir_path(&mut self, dir_path: &str) -> Result<()> {
        let dir_name = self.dir_name.clone();
        self.configure(dir_path, &dir_name)
    }

    /// Change only the directory name
    pub fn set_dir_name(&mut self, dir_name: &str) -> Result<()> {
        self.dir_name = dir_name.to_string();
        self.reopen()
    }

    /// Append one line and flush it.
    ///
    /// Opens the sink first if it is closed. A failed write closes the sink
    /// so the next append starts from a fresh handle.
    pub fn append(&mut self, line: &str) -> Result<()> {
        let sync_strategy = self.sync_strategy;
        let writer = self.ensure_open()?;

        let result = writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.write_all(b"\n"))
            .and_then(|_| writer.flush())
            .and_then(|_| match sync_strategy {
                SyncStrategy::Flush => Ok(()),
                SyncStrategy::EveryWrite => writer.get_ref().sync_data(),
            });

        match result {
            Ok(()) => {
                self.lines_written += 1;
                trace!(line, "command logged");
                Ok(())
            }
            Err(source) => {
                let path = self.path();
                warn!(path = %path.display(), error = %source, "command log write failed");
                self.writer = None;
                Err(StoreError::LoggingFailure { path, source })
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Directory holding the log file
    pub fn dir(&self) -> PathBuf {
        self.root_dir.join(&self.dir_path).join(&self.dir_name)
    }

    /// Full path of the log file
    pub fn path(&self) -> PathBuf {
        self.dir().join(&self.file_name)
    }

    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    // =========================================================================
    // Sink lifecycle
    // =========================================================================

    fn reopen(&mut self) -> Result<()> {
        self.close();
        self.ensure_open().map(|_| ())
    }

    fn ensure_open(&mut self) -> Result<&mut BufWriter<File>> {
        let writer = match self.writer.take() {
            Some(writer) => writer,
            None => BufWriter::new(self.open_file()?),
        };
        Ok(self.writer.insert(writer))
    }

    fn open_file(&self) -> Result<File> {
        let dir = self.dir();
        fs::create_dir_all(&dir).map_err(|source| {
            warn!(dir = %dir.display(), error = %source, "cannot create command log directory");
            StoreError::LoggingFailure {
                path: dir.clone(),
                source,
            }
        })?;

        let path = self.path();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| {
                warn!(path = %path.display(), error = %source, "cannot open command log");
                StoreError::LoggingFailure {
                    path: path.clone(),
                    source,
                }
            })?;

        debug!(path = %path.display(), "command log opened");
        Ok(file)
    }

    fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.flush() {
                warn!(path = %self.path().display(), error = %e, "flush on close failed");
            }
            debug!(path = %self.path().display(), "command log closed");
        }
    }
}

impl Drop for CommandLog {
    fn drop(&mut self) {
        self.close();
    }
}
