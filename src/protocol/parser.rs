//! Command file parser
//!
//! Turns a line-oriented command file into [`Command`]s, one at a time.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use std::str::FromStr;

use crate::error::{BuddyError, Result};
use crate::hashtable::Key;
use crate::seminar::Seminar;

use super::{Command, PrintTarget};

/// Streaming parser over any buffered reader
///
/// Yields one `Result<Command>` per command. Errors carry the 1-based line
/// number where the problem was found.
pub struct CommandParser<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> CommandParser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// Line number of the last line read
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn next_line(&mut self) -> Result<Option<String>> {
        match self.lines.next() {
            Some(line) => {
                self.line_no += 1;
                Ok(Some(line?))
            }
            None => Ok(None),
        }
    }

    /// Next line of an `insert` body; running out of input is an error
    fn expect_line(&mut self, what: &str) -> Result<String> {
        match self.next_line()? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(self.error(format!("unexpected end of file, expected {}", what))),
        }
    }

    fn parse_command(&mut self, line: &str) -> Result<Command> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let arg = words.next();

        match name {
            "insert" => {
                let id = self.parse_field(arg, "record id")?;
                self.parse_insert_body(id)
            }
            "delete" => Ok(Command::Delete {
                id: self.parse_field(arg, "record id")?,
            }),
            "search" => Ok(Command::Search {
                id: self.parse_field(arg, "record id")?,
            }),
            "print" => match arg {
                Some("hashtable") => Ok(Command::Print {
                    target: PrintTarget::HashTable,
                }),
                Some("blocks") => Ok(Command::Print {
                    target: PrintTarget::Blocks,
                }),
                Some(other) => Err(self.error(format!("unknown print target '{}'", other))),
                None => Err(self.error("missing print target")),
            },
            other => Err(self.error(format!("unknown command '{}'", other))),
        }
    }

    /// Title, logistics, keywords and description lines of an `insert`
    fn parse_insert_body(&mut self, id: Key) -> Result<Command> {
        let title = self.expect_line("title")?;

        let logistics = self.expect_line("date, length, x, y and cost")?;
        let mut fields = logistics.split_whitespace();
        let date = fields
            .next()
            .ok_or_else(|| self.error("missing date"))?
            .to_string();
        let length = self.parse_field(fields.next(), "length")?;
        let x = self.parse_field(fields.next(), "x coordinate")?;
        let y = self.parse_field(fields.next(), "y coordinate")?;
        let cost = self.parse_field(fields.next(), "cost")?;

        let keywords = self
            .expect_line("keywords")?
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let description = self.expect_line("description")?;

        Ok(Command::Insert {
            seminar: Seminar {
                id,
                title,
                date,
                length,
                x,
                y,
                cost,
                keywords,
                description,
            },
        })
    }

    fn parse_field<T: FromStr>(&self, field: Option<&str>, what: &str) -> Result<T> {
        let field = field.ok_or_else(|| self.error(format!("missing {}", what)))?;
        field
            .parse()
            .map_err(|_| self.error(format!("invalid {} '{}'", what, field)))
    }

    fn error(&self, message: impl Into<String>) -> BuddyError {
        BuddyError::Parse {
            line: self.line_no,
            message: message.into(),
        }
    }
}

impl CommandParser<BufReader<File>> {
    /// Open a command file on disk
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<'a> CommandParser<&'a [u8]> {
    /// Parse commands held in memory
    pub fn from_text(input: &'a str) -> Self {
        Self::new(input.as_bytes())
    }
}

impl<R: BufRead> Iterator for CommandParser<R> {
    type Item = Result<Command>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            tracing::trace!("Parsing line {}: {}", self.line_no, line);
            return Some(self.parse_command(line));
        }
    }
}
