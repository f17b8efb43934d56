//! Command Log Reader
//!
//! Handles reading command lines back from the log file.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::error::{Result, StoreError};
use crate::protocol::{decode_command, Command};

/// Reads commands from a log file, one per line
pub struct CommandLogReader {
    lines: Lines<BufReader<File>>,

    /// 1-based number of the last line read
    line_no: usize,
}

impl CommandLogReader {
    /// Open a log file for reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }

    /// Read the next command, skipping blank lines
    pub fn next_command(&mut self) -> Result<Option<Command<String, String>>> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            return decode_command(&line)
                .map(Some)
                .map_err(|e| StoreError::CorruptLog {
                    line: self.line_no,
                    reason: match e {
                        StoreError::Parse(reason) => reason,
                        other => other.to_string(),
                    },
                });
        }
        Ok(None)
    }

    /// Read every remaining command
    pub fn read_all(mut self) -> Result<Vec<Command<String, String>>> {
        let mut commands = Vec::new();
        while let Some(command) = self.next_command()? {
            commands.push(command);
        }
        Ok(commands)
    }

    /// Number of lines consumed so far
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl Iterator for CommandLogReader {
    type Item = Result<Command<String, String>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_command().transpose()
    }
}
