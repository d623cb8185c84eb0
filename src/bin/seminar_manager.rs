//! Seminar Manager Binary
//!
//! Runs a command file against a fresh engine and prints each response.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use buddykv::protocol::CommandParser;
use buddykv::{Config, Engine};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// Seminar Manager
#[derive(Parser, Debug)]
#[command(name = "seminar-manager")]
#[command(about = "Seminar database backed by a buddy memory pool and a hash index")]
#[command(version)]
struct Args {
    /// Initial memory pool size in bytes (power of two)
    initial_memory_size: usize,

    /// Initial hash table size in slots (power of two)
    initial_hash_size: usize,

    /// Command file to execute
    command_file: PathBuf,
}

fn main() {
    // Diagnostics go to stderr; command output owns stdout
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("Seminar Manager v{}", buddykv::VERSION);

    let config = Config::builder()
        .initial_pool_size(args.initial_memory_size)
        .initial_hash_size(args.initial_hash_size)
        .build();

    let mut engine = match Engine::open(config) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("Failed to open engine: {}", e);
            std::process::exit(1);
        }
    };

    let parser = match CommandParser::open(&args.command_file) {
        Ok(parser) => parser,
        Err(e) => {
            tracing::error!("Failed to open {}: {}", args.command_file.display(), e);
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for command in parser {
        let result = command.and_then(|command| engine.execute(command));
        match result {
            Ok(response) => {
                if let Err(e) = writeln!(out, "{}", response) {
                    tracing::error!("Failed to write output: {}", e);
                    std::process::exit(1);
                }
            }
            Err(e) => {
                let _ = out.flush();
                tracing::error!("{}", e);
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = out.flush() {
        tracing::error!("Failed to write output: {}", e);
        std::process::exit(1);
    }
}
