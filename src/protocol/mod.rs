//! Protocol Module
//!
//! Defines the textual command format shared by the command log, the log
//! reader and the interactive CLI.
//!
//! ## Line Format
//!
//! ```text
//! <OPERATION> [<key> [<value>]]
//! ```
//!
//! - Operation keywords are upper-case when written and case-insensitive when
//!   read.
//! - The key is the second space-separated token.
//! - The value is everything after the key and its separating space, so a
//!   value may contain spaces and may be empty.
//! - Backslash escapes keep a command on one line: `\\`, `\n`, `\r`, and in
//!   keys `\s` for a space and `\e` for the empty key.
//!
//! ### Mutating Commands (written to the log)
//! - `SET k v`, `SETNX k v`, `UPDATE k v`, `DEL k`
//! - `INCR k`, `DECR k`
//! - `LPUSH k v`, `RPUSH k v`, `LPOP k v`, `RPOP k v` (popped value)
//! - `CLEAR`, `CLEARLIST`, `CLEARALL`
//!
//! ### Read Commands (never logged)
//! - `GET k`, `EXISTS k`, `LEXISTS k`, `LLEN k`
//! - `KEYS`, `LKEYS`, `SIZE`, `LSIZE`

mod command;
mod response;
mod codec;

pub use command::{Command, CommandType};
pub use response::Reply;
pub use codec::{decode_command, encode_command};
