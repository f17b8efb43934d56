//! Command Log Module
//!
//! Records every mutating store call as one line of text.
//!
//! ## Responsibilities
//! - Append one line per mutation, flushed before the call returns
//! - Open the sink lazily and reopen it when its location changes
//! - Close the sink exactly once, when the log is dropped
//! - Read a log back for audit or replay
//!
//! ## File Layout
//! ```text
//! {root_dir}/{dir_path}/{dir_name}/{log_file_name}
//!
//! SET name1 alex
//! LPUSH queue1 42
//! INCR counter
//! CLEARALL
//! ```
//!
//! There is no header, checksum or compaction: the file only ever grows.

mod writer;
mod reader;

pub use writer::CommandLog;
pub use reader::CommandLogReader;
