//! vmgrep - extract error blocks referencing main.cpp from memory-diagnostic logs
//!
//! This is the binary entry point. All scanning logic lives in vmgrep-core.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use vmgrep_core::prelude::*;
use vmgrep_core::{logging, ErrorBlocks};

/// vmgrep - extract error blocks referencing main.cpp from memory-diagnostic logs
#[derive(Parser, Debug)]
#[command(name = "vmgrep")]
#[command(
    about = "Extract error blocks referencing main.cpp from a memory-diagnostic log",
    long_about = None
)]
struct Args {
    /// Path to the memory-diagnostic log file
    #[arg(value_name = "LOG_FILE")]
    log_file: PathBuf,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // A wrong argument count is a usage outcome decided here at the entry
    // boundary, never inside the scanner: print clap's message and exit 1.
    // Help and version requests go to stdout and exit 0.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let is_usage_error = err.use_stderr();
            let _ = err.print();
            std::process::exit(if is_usage_error { 1 } else { 0 });
        }
    };

    logging::init()?;
    info!("scanning {}", args.log_file.display());

    // An unreadable path propagates out of main uncaught; the file handle is
    // scoped to this scan and closed on every exit path by drop.
    let file =
        File::open(&args.log_file).map_err(|err| Error::open_log(&args.log_file, err))?;
    let mut blocks = ErrorBlocks::new(BufReader::new(file));

    for block in blocks.by_ref() {
        let block = block?;
        // Block text goes out byte-for-byte, followed by a blank separator line
        print!("{}", block.content);
        if !block.content.ends_with('\n') {
            println!();
        }
        println!();
    }

    let count = blocks.qualified_count();
    info!(count, "scan complete");
    println!("Errors = {count}");

    Ok(())
}
