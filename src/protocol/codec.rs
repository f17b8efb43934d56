//! Protocol codec
//!
//! Encoding and decoding between [`Command`] and its one-line text form.
//!
//! ```text
//! SET name1 alex
//! LPUSH queue1 42
//! LPOP queue1 42
//! SET greeting hello\nworld
//! SET my\skey spaced value
//! CLEARALL
//! ```
//!
//! Keys and values are escaped so every command stays on one line and reads
//! back unchanged: `\\` for a backslash, `\n` and `\r` for line breaks, and
//! in keys `\s` for a space and `\e` for the empty key. A value is the rest of
//! the line after the separating space, so an empty value is written as a
//! trailing space.

use std::fmt::{self, Write};
use std::str::FromStr;

use crate::error::{Result, StoreError};
use super::{Command, CommandType};

// =============================================================================
// Encoding
// =============================================================================

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Command<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        if let Some(key) = self.key() {
            f.write_char(' ')?;
            write_escaped(f, &key.to_string(), Field::Key)?;
        }
        if let Some(value) = self.value() {
            f.write_char(' ')?;
            write_escaped(f, &value.to_string(), Field::Value)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Key,
    Value,
}

fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str, field: Field) -> fmt::Result {
    if field == Field::Key && text.is_empty() {
        return f.write_str("\\e");
    }
    for c in text.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            ' ' if field == Field::Key => f.write_str("\\s")?,
            c => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Encode a command as a single line (no trailing newline)
pub fn encode_command<K: fmt::Display, V: fmt::Display>(command: &Command<K, V>) -> String {
    command.to_string()
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode one line into a command over string keys and values
pub fn decode_command(line: &str) -> Result<Command<String, String>> {
    let line = line
        .trim_start()
        .trim_end_matches(|c: char| c == '\r' || c == '\n');
    if line.is_empty() {
        return Err(StoreError::Parse("empty command".to_string()));
    }

    let (keyword, rest) = split_token(line);
    let ty = CommandType::from_keyword(keyword)
        .ok_or_else(|| StoreError::Parse(format!("unknown command: {}", keyword)))?;

    let mut args = Args { ty, rest };
    let command = match ty {
        CommandType::Set => Command::Set { key: args.key()?, value: args.value()? },
        CommandType::SetNx => Command::SetNx { key: args.key()?, value: args.value()? },
        CommandType::Update => Command::Update { key: args.key()?, value: args.value()? },
        CommandType::LPush => Command::LPush { key: args.key()?, value: args.value()? },
        CommandType::RPush => Command::RPush { key: args.key()?, value: args.value()? },
        CommandType::LPop => Command::LPop { key: args.key()?, value: args.optional_value()? },
        CommandType::RPop => Command::RPop { key: args.key()?, value: args.optional_value()? },
        CommandType::Del => Command::Del { key: args.only_key()? },
        CommandType::Incr => Command::Incr { key: args.only_key()? },
        CommandType::Decr => Command::Decr { key: args.only_key()? },
        CommandType::Get => Command::Get { key: args.only_key()? },
        CommandType::Exists => Command::Exists { key: args.only_key()? },
        CommandType::LExists => Command::LExists { key: args.only_key()? },
        CommandType::LLen => Command::LLen { key: args.only_key()? },
        CommandType::Clear => args.nothing(Command::Clear)?,
        CommandType::ClearList => args.nothing(Command::ClearList)?,
        CommandType::ClearAll => args.nothing(Command::ClearAll)?,
        CommandType::Keys => args.nothing(Command::Keys)?,
        CommandType::LKeys => args.nothing(Command::LKeys)?,
        CommandType::Size => args.nothing(Command::Size)?,
        CommandType::LSize => args.nothing(Command::LSize)?,
    };

    Ok(command)
}

impl FromStr for Command<String, String> {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        decode_command(s)
    }
}

/// Split off the next space-delimited token. `None` means no separator
/// followed it.
fn split_token(text: &str) -> (&str, Option<&str>) {
    match text.split_once(' ') {
        Some((token, rest)) => (token, Some(rest)),
        None => (text, None),
    }
}

fn unescape(text: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('s') => out.push(' '),
            Some('e') => {}
            Some(other) => {
                return Err(StoreError::Parse(format!("unknown escape \\{}", other)))
            }
            None => return Err(StoreError::Parse("dangling escape at end of line".to_string())),
        }
    }
    Ok(out)
}

/// Cursor over the arguments following the keyword
struct Args<'a> {
    ty: CommandType,
    rest: Option<&'a str>,
}

impl<'a> Args<'a> {
    fn key(&mut self) -> Result<String> {
        let (key, rest) = split_token(self.rest.take().unwrap_or(""));
        if key.is_empty() {
            return Err(self.missing("key"));
        }
        self.rest = rest;
        unescape(key)
    }

    /// Key followed by nothing else
    fn only_key(&mut self) -> Result<String> {
        let key = self.key()?;
        self.finish()?;
        Ok(key)
    }

    /// The value is the remainder of the line, spaces included, and may be
    /// empty
    fn value(&mut self) -> Result<String> {
        match self.rest.take() {
            Some(value) => unescape(value),
            None => Err(self.missing("value")),
        }
    }

    fn optional_value(&mut self) -> Result<Option<String>> {
        self.rest.take().map(unescape).transpose()
    }

    fn nothing(&mut self, command: Command<String, String>) -> Result<Command<String, String>> {
        self.finish()?;
        Ok(command)
    }

    fn finish(&self) -> Result<()> {
        match self.rest {
            Some(rest) if !rest.trim().is_empty() => Err(StoreError::Parse(format!(
                "{} takes no further arguments, got {:?}",
                self.ty.keyword(),
                rest
            ))),
            _ => Ok(()),
        }
    }

    fn missing(&self, what: &str) -> StoreError {
        StoreError::Parse(format!("{} requires a {}", self.ty.keyword(), what))
    }
}
