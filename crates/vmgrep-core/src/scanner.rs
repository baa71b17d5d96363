//! Error block scanner for memory-diagnostic logs.
//!
//! Provides a line-by-line state machine scanner that detects delimited error
//! blocks (`... BEGIN` / `... END`), accumulates their lines verbatim, and
//! emits only the blocks containing a stack frame attributed to main.cpp.

use std::io::BufRead;

use tracing::{debug, trace};

use crate::error::Result;
use crate::patterns::{classify, LineRole};

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

/// A qualifying error block extracted from the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBlock {
    /// Exact text of every line from the start marker through the end marker,
    /// line terminators intact.
    pub content: String,

    /// Number of lines in the block (for diagnostics)
    pub line_count: usize,
}

/// Result of feeding a line to the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedResult {
    /// Line fell outside any block and was skipped
    Ignored,

    /// Line was buffered into the current block
    Buffered,

    /// An end marker closed a block containing a main.cpp frame
    Completed(ErrorBlock),

    /// An end marker closed a block with no main.cpp frame, or one that never
    /// had a start marker; state was reset and nothing is emitted
    Discarded,
}

// ─────────────────────────────────────────────────────────────────────────────
// Scanner
// ─────────────────────────────────────────────────────────────────────────────

/// Line-by-line state machine scanner for delimited error blocks.
#[derive(Debug, Default)]
pub struct BlockScanner {
    /// Whether a start marker has been seen for the current block
    inside_block: bool,

    /// Whether the current block contains a main.cpp frame
    qualified: bool,

    /// Accumulated text of the current block
    buffer: String,

    /// Lines buffered into the current block
    buffered_lines: usize,

    /// Qualifying blocks emitted so far
    qualified_count: usize,
}

impl BlockScanner {
    /// Create a new scanner in the idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw line, terminator included if the input had one.
    ///
    /// Per line, in order: classify against the ordered pattern list, update
    /// the block flags, buffer the line while inside a block, then close the
    /// block if this line was an end marker.
    pub fn feed_line(&mut self, raw: &str) -> FeedResult {
        let mut pending_end = false;

        match classify(raw, self.inside_block) {
            LineRole::BlockStart => {
                if !self.inside_block {
                    trace!("block opened");
                }
                // A repeated start marker re-triggers the open block; it does
                // not close it or clear the buffer. Blocks do not nest.
                self.inside_block = true;
            }
            LineRole::TargetFrame => self.qualified = true,
            LineRole::BlockEnd => pending_end = true,
            LineRole::Content => {}
        }

        let buffered = self.inside_block;
        if buffered {
            self.buffer.push_str(raw);
            self.buffered_lines += 1;
        }

        if pending_end {
            return self.close_block();
        }

        if buffered {
            FeedResult::Buffered
        } else {
            FeedResult::Ignored
        }
    }

    /// Drop any in-progress, never-closed block at end of input.
    ///
    /// An unterminated block is defined data, not an error: it is neither
    /// emitted nor counted.
    pub fn finish(&mut self) {
        if self.inside_block {
            debug!(
                lines = self.buffered_lines,
                "unterminated block dropped at end of input"
            );
        }
        self.reset();
    }

    /// Qualifying blocks emitted so far
    pub fn qualified_count(&self) -> usize {
        self.qualified_count
    }

    /// Close the block on an end marker: emit iff a start marker was seen and
    /// a main.cpp frame matched, then reset either way.
    fn close_block(&mut self) -> FeedResult {
        let emit = self.inside_block && self.qualified;
        let content = std::mem::take(&mut self.buffer);
        let line_count = self.buffered_lines;
        self.reset();

        if emit {
            self.qualified_count += 1;
            debug!(lines = line_count, "qualifying block closed");
            FeedResult::Completed(ErrorBlock {
                content,
                line_count,
            })
        } else {
            trace!("block discarded");
            FeedResult::Discarded
        }
    }

    /// Reset the per-block state; the qualifying count survives.
    fn reset(&mut self) {
        self.inside_block = false;
        self.qualified = false;
        self.buffer.clear();
        self.buffered_lines = 0;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reader-backed iteration
// ─────────────────────────────────────────────────────────────────────────────

/// Lazy iterator over the qualifying blocks of a reader.
///
/// Blocks are yielded in the order their end markers appear. Lines are read
/// with their terminators so emitted content is byte-identical to the input.
/// Once the iterator is exhausted, [`qualified_count`](Self::qualified_count)
/// reports the final total.
#[derive(Debug)]
pub struct ErrorBlocks<R> {
    reader: R,
    scanner: BlockScanner,
    line: String,
    done: bool,
}

impl<R: BufRead> ErrorBlocks<R> {
    /// Scan qualifying blocks out of `reader`
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            scanner: BlockScanner::new(),
            line: String::new(),
            done: false,
        }
    }

    /// Qualifying blocks emitted so far
    pub fn qualified_count(&self) -> usize {
        self.scanner.qualified_count()
    }
}

impl<R: BufRead> Iterator for ErrorBlocks<R> {
    type Item = Result<ErrorBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => {
                    self.scanner.finish();
                    self.done = true;
                    return None;
                }
                Ok(_) => {
                    if let FeedResult::Completed(block) = self.scanner.feed_line(&self.line) {
                        return Some(Ok(block));
                    }
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
