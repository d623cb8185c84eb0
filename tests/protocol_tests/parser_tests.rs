//! Command Parser Tests
//!
//! Tests verify:
//! - Every command form parses
//! - Insert bodies span four lines
//! - Blank lines between commands are skipped
//! - Errors carry line numbers
//! - Response text matches the seminar manager's output

use std::io::Write;

use buddykv::hashtable::HashTableReport;
use buddykv::memory::{FreeBlockReport, FreeTier};
use buddykv::protocol::{Command, CommandParser, CommandType, Expansion, PrintTarget, Response};
use buddykv::seminar::Seminar;
use buddykv::BuddyError;
use tempfile::NamedTempFile;

// =============================================================================
// Helper Functions
// =============================================================================

const INSERT_BLOCK: &str = "insert 1
Overview of HCI Research at VT
0610051600 90 10 10 45
HCI Computer_Science VT Virginia_Tech
This seminar will present an overview of HCI research at VT
";

fn parse_all(input: &str) -> Vec<Command> {
    CommandParser::from_text(input)
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn first_error(input: &str) -> BuddyError {
    CommandParser::from_text(input)
        .find_map(|result| result.err())
        .expect("expected a parse error")
}

// =============================================================================
// Command Tests
// =============================================================================

#[test]
fn test_parse_insert() {
    let commands = parse_all(INSERT_BLOCK);

    assert_eq!(commands.len(), 1);
    assert_eq!(
        commands[0],
        Command::Insert {
            seminar: Seminar {
                id: 1,
                title: "Overview of HCI Research at VT".to_string(),
                date: "0610051600".to_string(),
                length: 90,
                x: 10,
                y: 10,
                cost: 45,
                keywords: vec![
                    "HCI".to_string(),
                    "Computer_Science".to_string(),
                    "VT".to_string(),
                    "Virginia_Tech".to_string(),
                ],
                description: "This seminar will present an overview of HCI research at VT"
                    .to_string(),
            }
        }
    );
    assert_eq!(commands[0].command_type(), CommandType::Insert);
}

#[test]
fn test_parse_simple_commands() {
    let commands = parse_all("search 3\ndelete 4\nprint hashtable\nprint blocks\n");

    assert_eq!(
        commands,
        vec![
            Command::Search { id: 3 },
            Command::Delete { id: 4 },
            Command::Print {
                target: PrintTarget::HashTable
            },
            Command::Print {
                target: PrintTarget::Blocks
            },
        ]
    );
}

#[test]
fn test_blank_lines_and_indentation_are_ignored() {
    let input = format!("\n   \n  search   7  \n\n{}\n\ndelete 1\n", INSERT_BLOCK);

    let commands = parse_all(&input);

    assert_eq!(commands.len(), 3);
    assert_eq!(commands[0], Command::Search { id: 7 });
    assert_eq!(commands[1].command_type(), CommandType::Insert);
    assert_eq!(commands[2], Command::Delete { id: 1 });
}

#[test]
fn test_negative_coordinates() {
    let input = "insert 2\nTitle\n0610071600 60 -5 -20 30\nkw\nDesc\n";

    match &parse_all(input)[0] {
        Command::Insert { seminar } => {
            assert_eq!(seminar.x, -5);
            assert_eq!(seminar.y, -20);
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_parse_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}search 1\n", INSERT_BLOCK).unwrap();

    let parser = CommandParser::open(file.path()).unwrap();
    let commands: Vec<_> = parser.collect::<Result<_, _>>().unwrap();

    assert_eq!(commands.len(), 2);
}

#[test]
fn test_open_missing_file() {
    let result = CommandParser::open(std::path::Path::new("/definitely/not/here.txt"));

    assert!(matches!(result, Err(BuddyError::Io(_))));
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_unknown_command() {
    match first_error("search 1\nupdate 2\n") {
        BuddyError::Parse { line, message } => {
            assert_eq!(line, 2);
            assert!(message.contains("update"));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_missing_and_invalid_ids() {
    assert!(matches!(first_error("delete\n"), BuddyError::Parse { line: 1, .. }));
    assert!(matches!(first_error("search abc\n"), BuddyError::Parse { line: 1, .. }));
}

#[test]
fn test_unknown_print_target() {
    assert!(matches!(first_error("print memory\n"), BuddyError::Parse { line: 1, .. }));
    assert!(matches!(first_error("print\n"), BuddyError::Parse { line: 1, .. }));
}

#[test]
fn test_truncated_insert() {
    match first_error("insert 1\nTitle\n0610051600 90 10 10 45\n") {
        BuddyError::Parse { line, message } => {
            assert_eq!(line, 3);
            assert!(message.contains("keywords"));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_bad_logistics_line() {
    match first_error("insert 1\nTitle\n0610051600 ninety 10 10 45\nkw\nDesc\n") {
        BuddyError::Parse { line, message } => {
            assert_eq!(line, 3);
            assert!(message.contains("length"));
        }
        other => panic!("unexpected error {:?}", other),
    }

    assert!(matches!(
        first_error("insert 1\nTitle\n0610051600 90 10\nkw\nDesc\n"),
        BuddyError::Parse { line: 3, .. }
    ));
}

// =============================================================================
// Response Rendering Tests
// =============================================================================

#[test]
fn test_response_messages() {
    assert_eq!(
        Response::DuplicateId { id: 4 }.to_string(),
        "Insert FAILED - There is already a record with ID 4"
    );
    assert_eq!(
        Response::Deleted { id: 4 }.to_string(),
        "Record with ID 4 successfully deleted from the database"
    );
    assert_eq!(
        Response::DeleteMissing { id: 4 }.to_string(),
        "Delete Failed -- There is no record with ID 4"
    );
    assert_eq!(
        Response::SearchMissing { id: 4 }.to_string(),
        "Search FAILED -- There is no record with ID 4"
    );
}

#[test]
fn test_inserted_response_includes_record_and_size() {
    let seminar = match &parse_all(INSERT_BLOCK)[0] {
        Command::Insert { seminar } => seminar.clone(),
        other => panic!("unexpected command {:?}", other),
    };

    let text = Response::Inserted {
        seminar: seminar.clone(),
        size: 170,
        expansions: Vec::new(),
    }
    .to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Successfully inserted record with ID 1");
    assert_eq!(lines[1], "ID: 1, Title: Overview of HCI Research at VT");
    assert_eq!(lines.last(), Some(&"Size: 170"));

    let text = Response::Inserted {
        seminar,
        size: 170,
        expansions: vec![Expansion::MemoryPool(256), Expansion::HashTable(32)],
    }
    .to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Memory pool expanded to 256 bytes");
    assert_eq!(lines[1], "Hash table expanded to 32 records");
    assert_eq!(lines[2], "Successfully inserted record with ID 1");
}

#[test]
fn test_report_responses_render_dumps() {
    let blocks = Response::Blocks(FreeBlockReport {
        tiers: vec![
            FreeTier {
                block_size: 32,
                positions: vec![32],
            },
            FreeTier {
                block_size: 64,
                positions: vec![64, 192],
            },
        ],
    });
    assert_eq!(blocks.to_string(), "Freeblock List:\n32: 32\n64: 64 192");

    let table = Response::HashTable(HashTableReport {
        slots: vec![],
        total_records: 0,
        capacity: 4,
    });
    assert_eq!(table.to_string(), "Hashtable:\ntotal records: 0");
}
