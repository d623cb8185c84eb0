//! Protocol Module
//!
//! The line-oriented command file that drives the seminar manager.
//!
//! ## File Format
//! ```text
//! insert <id>
//! <title>
//! <date> <length> <x> <y> <cost>
//! <keyword> <keyword> ...
//! <description>
//! search <id>
//! delete <id>
//! print hashtable
//! print blocks
//! ```
//! Commands are separated by line breaks; blank lines between commands are
//! ignored. An `insert` always consumes the four lines that follow it.

mod command;
mod parser;
mod response;

pub use command::{Command, CommandType, PrintTarget};
pub use parser::CommandParser;
pub use response::{Expansion, Response};
