//! # DuoKV
//!
//! An in-process key-value store with:
//! - A scalar namespace (`key -> value`)
//! - A list namespace (`key -> double-ended list`), disjoint from the scalars
//! - Integer coercion for `incr`/`decr` on integer or numeric-text values
//! - An optional append-only command log, one line per mutation
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Caller / SharedStore (Mutex)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Store<K, V>                           │
//! │                 (mutate first, then log)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Namespaces │          │ CommandLog  │
//!   │ scalar/list │          │  (append)   │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use duokv::{Config, Store};
//!
//! let config = Config::builder().dir_path("data").logging(true).build();
//! let mut store: Store<String, String> = Store::with_config(config)?;
//!
//! store.set("name1".to_string(), "alex".to_string())?;
//! store.set("hits".to_string(), "10".to_string())?;
//! assert_eq!(store.incr(&"hits".to_string())?, "11");
//! # Ok::<(), duokv::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod value;
pub mod protocol;
pub mod persistor;
pub mod store;
pub mod shared;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Namespace, Result, StoreError};
pub use config::{Config, SyncStrategy};
pub use value::{Numeric, StoreValue};
pub use protocol::{Command, Reply};
pub use store::{ReplayResult, Store};
pub use shared::SharedStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of DuoKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
