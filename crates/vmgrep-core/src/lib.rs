//! # vmgrep-core - Error Block Scanning
//!
//! Foundation crate for vmgrep. Provides the line classifier, the block
//! scanner state machine, error handling, and logging setup.
//!
//! ## Public API
//!
//! ### Line Classification (`patterns`)
//! - [`classify()`] - Assign a line its role via the ordered pattern list
//! - [`LineRole`] - Start marker, main.cpp frame, end marker, or content
//!
//! ### Scanning (`scanner`)
//! - [`BlockScanner`] - Line-by-line state machine over delimited error blocks
//! - [`FeedResult`] - Result of feeding a line to the scanner
//! - [`ErrorBlock`] - A qualifying block's verbatim text
//! - [`ErrorBlocks`] - Lazy iterator over the qualifying blocks of a reader
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use vmgrep_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod patterns;
pub mod scanner;

/// Prelude for common imports
pub mod prelude {
    pub use super::error::{Error, Result};
    pub use tracing::{debug, error, info, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result};
pub use patterns::{classify, trim_line_terminator, LineRole};
pub use scanner::{BlockScanner, ErrorBlock, ErrorBlocks, FeedResult};
