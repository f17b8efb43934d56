//! Error types for DuoKV
//!
//! Provides a unified error type for all store operations.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Which of the two keyspaces an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Scalar,
    List,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Scalar => f.write_str("scalar namespace"),
            Namespace::List => f.write_str("list namespace"),
        }
    }
}

/// Unified error type for DuoKV operations
///
/// Keys are carried in their rendered (`Display`) form so the error type
/// stays independent of the store's key type.
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Key not found: {0}")]
    NotFound(String),

    #[error("Key already exists: {0}")]
    Conflict(String),

    #[error("No keys found in {0}")]
    EmptyNamespace(Namespace),

    #[error("List is empty: {0}")]
    EmptyList(String),

    // -------------------------------------------------------------------------
    // Coercion Errors
    // -------------------------------------------------------------------------
    #[error("Value type does not support increment/decrement: {0}")]
    UnsupportedType(String),

    #[error("Value is not an integer: {0:?}")]
    NotAnInteger(String),

    #[error("Increment or decrement out of range for key {0}")]
    Overflow(String),

    // -------------------------------------------------------------------------
    // Command Log Errors
    // -------------------------------------------------------------------------
    /// The mutation was applied in memory but its log line was not written.
    #[error("Command log unavailable at {}: {source}", .path.display())]
    LoggingFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed command: {0}")]
    Parse(String),

    #[error("Malformed command log line {line}: {reason}")]
    CorruptLog { line: usize, reason: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// True when the data change went through and only the audit line is
    /// missing.
    pub fn is_committed(&self) -> bool {
        matches!(self, StoreError::LoggingFailure { .. })
    }
}
