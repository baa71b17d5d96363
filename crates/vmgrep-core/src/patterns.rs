//! Line classification for memory-diagnostic logs.
//!
//! The diagnostic tool delimits each error report with sentinel lines ending
//! in `BEGIN` and `END`. Stack frames inside a report carry a parenthesized
//! source location at the end of the line, e.g. `(main.cpp:42)`.

use regex::Regex;
use std::sync::LazyLock;

// ─────────────────────────────────────────────────────────────────────────────
// Regex Patterns
// ─────────────────────────────────────────────────────────────────────────────

/// Matches a block start marker: arbitrary prefix, `BEGIN` at end of line.
pub static BLOCK_START_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"BEGIN$").expect("Invalid BLOCK_START_REGEX"));

/// Matches a block end marker: arbitrary prefix, `END` at end of line.
pub static BLOCK_END_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"END$").expect("Invalid BLOCK_END_REGEX"));

/// Matches a stack frame attributed to the profiled program's own source:
/// `... (main.cpp:42)` at end of line.
pub static MAIN_CPP_FRAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(main\.cpp:[0-9]+\)$").expect("Invalid MAIN_CPP_FRAME_REGEX")
});

// ─────────────────────────────────────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────────────────────────────────────

/// Role a single line plays in the block structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    /// Opens a block (or re-triggers the one already open)
    BlockStart,

    /// A stack frame attributed to main.cpp
    TargetFrame,

    /// Closes the current block
    BlockEnd,

    /// Anything else
    Content,
}

/// Classify a line against the ordered pattern list.
///
/// Patterns are tested in priority order — start, then main.cpp frame (only
/// while inside a block), then end — and the first match wins. A line is
/// never assigned more than one role.
pub fn classify(line: &str, inside_block: bool) -> LineRole {
    let text = trim_line_terminator(line);

    if BLOCK_START_REGEX.is_match(text) {
        LineRole::BlockStart
    } else if inside_block && MAIN_CPP_FRAME_REGEX.is_match(text) {
        LineRole::TargetFrame
    } else if BLOCK_END_REGEX.is_match(text) {
        LineRole::BlockEnd
    } else {
        LineRole::Content
    }
}

/// Strip a single trailing `\n` or `\r\n`, leaving other whitespace alone.
pub fn trim_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
